//! Surface materials.

use crate::{Color, Texture};

/// Shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Unlit: color times texture, ignores lights
    Basic,
    /// Blinn-Phong diffuse + specular
    Phong,
}

/// Which triangle faces are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Material properties.
#[derive(Debug, Clone)]
pub struct Material {
    pub kind: MaterialKind,
    /// Base color, multiplied with the texture when one is present
    pub color: Color,
    /// Color map
    pub map: Option<Texture>,
    pub side: Side,
    /// Specular highlight color (Phong only)
    pub specular: Color,
    /// Specular exponent (Phong only)
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Phong,
            color: Color::WHITE,
            map: None,
            side: Side::Front,
            specular: Color::from_hex(0x111111),
            shininess: 30.0,
        }
    }
}

impl Material {
    /// Unlit material.
    pub fn basic(color: Color) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color,
            ..Self::default()
        }
    }

    /// Lit Blinn-Phong material.
    pub fn phong(color: Color) -> Self {
        Self {
            kind: MaterialKind::Phong,
            color,
            ..Self::default()
        }
    }

    pub fn with_map(mut self, map: Texture) -> Self {
        self.map = Some(map);
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Whether this material responds to scene lights.
    pub fn is_lit(&self) -> bool {
        self.kind == MaterialKind::Phong
    }
}
