use crate::components::entity::Entity;
use crate::components::layer::RenderLayer;
use crate::core::scene::Scene;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::renderer::traits::LayerBatch;

fn instance_for(entity: &Entity) -> Option<RenderInstance> {
    if !entity.active {
        return None;
    }
    let sprite = entity.sprite.as_ref()?;
    let scale = if sprite.flip_x {
        -entity.scale.x
    } else {
        entity.scale.x
    };
    Some(RenderInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        rotation: entity.rotation,
        scale,
        sprite_col: sprite.col,
        atlas_row: sprite.row,
        atlas: sprite.atlas.0 as f32,
        alpha: sprite.alpha,
    })
}

/// Build the render buffer from the scene.
/// Instances are grouped by layer in draw order; one batch is emitted per
/// layer even when the layer has nothing to draw.
pub fn build_render_buffer(scene: &Scene, buffer: &mut RenderBuffer) {
    buffer.clear();

    for layer in RenderLayer::ALL {
        let start = buffer.instance_count();
        for instance in scene.in_layer(layer).filter_map(instance_for) {
            buffer.push(instance);
        }
        buffer.push_batch(LayerBatch {
            layer_id: layer.as_u8(),
            start,
            end: buffer.instance_count(),
        });
    }
}
