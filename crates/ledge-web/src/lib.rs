pub mod runner;
pub mod shared;

pub use runner::GameRunner;
pub use shared::SharedBufferRenderer;
pub use ledge_engine::InputEvent;

#[doc(hidden)]
pub use console_error_panic_hook;
#[doc(hidden)]
pub use console_log;

use wasm_bindgen::JsValue;

/// Log a fatal game error with its source chain and convert it into a
/// JavaScript `Error` for the host to throw.
pub fn fatal_to_js(err: &(dyn std::error::Error + 'static)) -> JsValue {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    log::error!("{}", message);
    js_sys::Error::new(&message).into()
}

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, resources, key input, data accessors)
///
/// Host call order: `game_create`, `game_load_resource` for every asset,
/// `game_init`, then `game_tick` per animation frame.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// ledge_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game type that implements `ledge_engine::Game` and has `new()`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not created. Call game_create() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_create() {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
        }

        #[wasm_bindgen]
        pub fn game_load_resource(name: &str, data: &str) {
            with_runner(|r| r.load_resource(name, data));
        }

        #[wasm_bindgen]
        pub fn game_init() -> Result<(), JsValue> {
            with_runner(|r| r.init()).map_err(|e| $crate::fatal_to_js(&e))?;
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) -> Result<(), JsValue> {
            with_runner(|r| r.tick(dt)).map_err(|e| $crate::fatal_to_js(&e))
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::InputEvent::KeyUp { key_code }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_layer_batches_ptr() -> *const f32 {
            with_runner(|r| r.layer_batches_ptr())
        }

        #[wasm_bindgen]
        pub fn get_layer_batch_count() -> u32 {
            with_runner(|r| r.layer_batch_count())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        // ---- Viewport accessors ----

        #[wasm_bindgen]
        pub fn get_viewport_left() -> i32 {
            with_runner(|r| r.viewport_left())
        }

        #[wasm_bindgen]
        pub fn get_viewport_bottom() -> i32 {
            with_runner(|r| r.viewport_bottom())
        }

        #[wasm_bindgen]
        pub fn get_projection_ptr() -> *const f32 {
            with_runner(|r| r.projection_ptr())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
