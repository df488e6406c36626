//! DataType - a value kind tagged with its FBX type name.

use std::fmt;

/// Storage kind of a property value.
///
/// Every [`DataType`] maps onto exactly one kind; Get/Set dispatch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ValueKind {
    /// Boolean flag
    Bool = 0,
    /// 64-bit floating point
    Double = 1,
    /// Three 64-bit floats (translation, rotation, scaling, colors)
    Double3 = 2,
    /// UTF-8 string
    String = 3,
    /// Enumeration ordinal (blend mode, wrap mode, ...)
    Enum = 4,
    /// Container without a value of its own
    Compound = 5,
}

impl ValueKind {
    /// Returns the name of this kind.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Double => "Double",
            Self::Double3 => "Double3",
            Self::String => "String",
            Self::Enum => "Enum",
            Self::Compound => "Compound",
        }
    }

    /// Returns true if values of this kind can be driven by a curve.
    #[inline]
    pub const fn is_animatable(self) -> bool {
        matches!(self, Self::Bool | Self::Double | Self::Double3 | Self::Enum)
    }

    /// Curve channels exposed by this kind.
    ///
    /// Single-component kinds expose one unnamed channel; Double3 exposes X/Y/Z.
    pub const fn channels(self) -> &'static [&'static str] {
        match self {
            Self::Bool | Self::Double | Self::Enum => &[""],
            Self::Double3 => &["X", "Y", "Z"],
            Self::String | Self::Compound => &[],
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// DataType describes what a property holds.
///
/// It combines a [`ValueKind`] with the FBX data type name. Two data types
/// are equal only if both match, so `Visibility Inheritance` is not `Bool`
/// even though both store a boolean.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    /// Storage kind
    pub kind: ValueKind,
    /// FBX type name
    pub name: &'static str,
}

impl DataType {
    /// Create a new DataType with given kind and name.
    #[inline]
    pub const fn new(kind: ValueKind, name: &'static str) -> Self {
        Self { kind, name }
    }

    #[inline]
    pub const fn is_compound(&self) -> bool {
        matches!(self.kind, ValueKind::Compound)
    }

    // === Base types ===

    pub const BOOL: Self = Self::new(ValueKind::Bool, "Bool");
    pub const DOUBLE: Self = Self::new(ValueKind::Double, "Double");
    pub const DOUBLE3: Self = Self::new(ValueKind::Double3, "Double3");
    pub const STRING: Self = Self::new(ValueKind::String, "KString");
    pub const ENUM: Self = Self::new(ValueKind::Enum, "Enum");
    pub const COMPOUND: Self = Self::new(ValueKind::Compound, "Compound");

    // === Semantic types used by node properties ===

    pub const VISIBILITY_INHERITANCE: Self =
        Self::new(ValueKind::Bool, "Visibility Inheritance");
    pub const LOCAL_TRANSLATION: Self = Self::new(ValueKind::Double3, "Lcl Translation");
    pub const LOCAL_ROTATION: Self = Self::new(ValueKind::Double3, "Lcl Rotation");
    pub const LOCAL_SCALING: Self = Self::new(ValueKind::Double3, "Lcl Scaling");

    /// Resolve a curve channel name for this type.
    ///
    /// `None` or `""` selects the default channel, which only exists for
    /// single-component kinds. Single-component kinds also accept their
    /// property name, supplied by the caller as `property_name`.
    pub fn resolve_channel(&self, channel: Option<&str>, property_name: &str) -> Option<&'static str> {
        let channels = self.kind.channels();
        let single = channels.len() == 1 && channels[0].is_empty();
        match channel {
            None | Some("") => single.then_some(""),
            Some(name) if single && name == property_name => Some(""),
            Some(name) => channels.iter().copied().find(|c| !c.is_empty() && *c == name),
        }
    }
}

impl fmt::Debug for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.kind.name() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.kind)
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_types_are_distinct() {
        assert_eq!(DataType::VISIBILITY_INHERITANCE.kind, ValueKind::Bool);
        assert_ne!(DataType::VISIBILITY_INHERITANCE, DataType::BOOL);
        assert_ne!(DataType::LOCAL_TRANSLATION, DataType::LOCAL_ROTATION);
    }

    #[test]
    fn test_resolve_channel() {
        assert_eq!(DataType::DOUBLE.resolve_channel(None, "EmissiveFactor"), Some(""));
        assert_eq!(
            DataType::DOUBLE.resolve_channel(Some("EmissiveFactor"), "EmissiveFactor"),
            Some("")
        );
        assert_eq!(DataType::DOUBLE.resolve_channel(Some("X"), "EmissiveFactor"), None);
        assert_eq!(DataType::LOCAL_TRANSLATION.resolve_channel(None, "Lcl Translation"), None);
        assert_eq!(
            DataType::LOCAL_TRANSLATION.resolve_channel(Some("Y"), "Lcl Translation"),
            Some("Y")
        );
        assert_eq!(DataType::STRING.resolve_channel(None, "RenderAPI"), None);
        assert_eq!(DataType::COMPOUND.resolve_channel(Some("X"), "root"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", DataType::LOCAL_TRANSLATION), "Lcl Translation");
        assert_eq!(format!("{:?}", DataType::LOCAL_TRANSLATION), "Lcl Translation(Double3)");
        assert_eq!(format!("{:?}", DataType::DOUBLE), "Double");
    }
}
