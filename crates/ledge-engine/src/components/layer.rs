/// Render layer: the draw-order group an entity belongs to.
///
/// Layers are drawn back-to-front in declaration order: walls first,
/// the player last. Every layer is drawn in full each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Walls = 0,
    #[default]
    Items = 1,
    Collectibles = 2,
    Player = 3,
}

impl RenderLayer {
    /// Total number of render layers.
    pub const COUNT: usize = 4;

    /// All layers in draw order.
    pub const ALL: [RenderLayer; Self::COUNT] = [
        RenderLayer::Walls,
        RenderLayer::Items,
        RenderLayer::Collectibles,
        RenderLayer::Player,
    ];

    /// Convert from a u8 value to a RenderLayer.
    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Convert to u8 for the wire format.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
