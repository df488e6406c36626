//! Texture enums stored in Enum properties.

use crate::util::{Error, Result, Value};

/// Texture blend mode, stored as `CurrentTextureBlendMode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BlendMode {
    Translucent = 0,
    Additive,
    Modulate,
    Modulate2,
    Over,
    #[default]
    Normal,
    Dissolve,
    Darken,
    ColorBurn,
    LinearBurn,
    DarkerColor,
    Lighten,
    Screen,
    ColorDodge,
    LinearDodge,
    LighterColor,
    SoftLight,
    HardLight,
    VividLight,
    LinearLight,
    PinLight,
    HardMix,
    Difference,
    Exclusion,
    Subtract,
    Divide,
    Hue,
    Saturation,
    Color,
    Luminosity,
    Overlay,
}

impl BlendMode {
    pub const ALL: [Self; 31] = [
        Self::Translucent,
        Self::Additive,
        Self::Modulate,
        Self::Modulate2,
        Self::Over,
        Self::Normal,
        Self::Dissolve,
        Self::Darken,
        Self::ColorBurn,
        Self::LinearBurn,
        Self::DarkerColor,
        Self::Lighten,
        Self::Screen,
        Self::ColorDodge,
        Self::LinearDodge,
        Self::LighterColor,
        Self::SoftLight,
        Self::HardLight,
        Self::VividLight,
        Self::LinearLight,
        Self::PinLight,
        Self::HardMix,
        Self::Difference,
        Self::Exclusion,
        Self::Subtract,
        Self::Divide,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
        Self::Overlay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Translucent => "Translucent",
            Self::Additive => "Additive",
            Self::Modulate => "Modulate",
            Self::Modulate2 => "Modulate2",
            Self::Over => "Over",
            Self::Normal => "Normal",
            Self::Dissolve => "Dissolve",
            Self::Darken => "Darken",
            Self::ColorBurn => "ColorBurn",
            Self::LinearBurn => "LinearBurn",
            Self::DarkerColor => "DarkerColor",
            Self::Lighten => "Lighten",
            Self::Screen => "Screen",
            Self::ColorDodge => "ColorDodge",
            Self::LinearDodge => "LinearDodge",
            Self::LighterColor => "LighterColor",
            Self::SoftLight => "SoftLight",
            Self::HardLight => "HardLight",
            Self::VividLight => "VividLight",
            Self::LinearLight => "LinearLight",
            Self::PinLight => "PinLight",
            Self::HardMix => "HardMix",
            Self::Difference => "Difference",
            Self::Exclusion => "Exclusion",
            Self::Subtract => "Subtract",
            Self::Divide => "Divide",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Color => "Color",
            Self::Luminosity => "Luminosity",
            Self::Overlay => "Overlay",
        }
    }
}

/// Texture wrap mode, stored as `WrapModeU` / `WrapModeV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum WrapMode {
    #[default]
    Repeat = 0,
    Clamp = 1,
}

impl WrapMode {
    pub const ALL: [Self; 2] = [Self::Repeat, Self::Clamp];

    pub fn name(self) -> &'static str {
        match self {
            Self::Repeat => "Repeat",
            Self::Clamp => "Clamp",
        }
    }
}

macro_rules! impl_enum_value {
    ($t:ty) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Enum(v as i32)
            }
        }

        impl TryFrom<i32> for $t {
            type Error = Error;

            fn try_from(ordinal: i32) -> Result<Self> {
                usize::try_from(ordinal)
                    .ok()
                    .and_then(|i| <$t>::ALL.get(i).copied())
                    .ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "{} is not a valid {} ordinal",
                            ordinal,
                            stringify!($t)
                        ))
                    })
            }
        }

        impl TryFrom<Value> for $t {
            type Error = Error;

            fn try_from(v: Value) -> Result<Self> {
                <$t>::try_from(i32::try_from(v)?)
            }
        }
    };
}

impl_enum_value!(BlendMode);
impl_enum_value!(WrapMode);

/// Item names declared on blend mode properties.
pub fn blend_mode_items() -> impl Iterator<Item = &'static str> {
    BlendMode::ALL.into_iter().map(BlendMode::name)
}

/// Item names declared on wrap mode properties.
pub fn wrap_mode_items() -> impl Iterator<Item = &'static str> {
    WrapMode::ALL.into_iter().map(WrapMode::name)
}
