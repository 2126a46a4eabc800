use crate::error::TypeError;

// ── Macro for wire-byte enum boilerplate ──────────────────────────────
//
// Both enums in this module follow the same pattern: a fixed set of
// named variants, each mapped to a single wire byte, plus a conversion
// pair (to_wire_byte / from_wire_byte). The macro eliminates the
// repetition while keeping each enum's doc comments and derive list
// explicit at the call site. There is deliberately no catch-all
// variant: an undefined ordinal is a decode error, never a value.

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Encode this variant as a single wire byte.
            pub fn to_wire_byte(self) -> u8 {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }

            /// Decode a wire byte into this enum.
            ///
            /// Returns `Err(TypeError::InvalidEnumValue)` if the byte
            /// doesn't match any known variant.
            pub fn from_wire_byte(value: u8) -> Result<Self, TypeError> {
                match value {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(TypeError::InvalidEnumValue {
                        enum_name: stringify!($name),
                        value: other,
                    }),
                }
            }
        }
    };
}

// ── Region ────────────────────────────────────────────────────────────

wire_enum! {
    /// Game server region, recorded once in the log header.
    ///
    /// ```text
    /// ┌──────┬────────┐
    /// │ Wire │ Region │
    /// ├──────┼────────┤
    /// │ 0x00 │ Kr     │
    /// │ 0x01 │ Jp     │
    /// │ 0x02 │ Tw     │
    /// │ 0x03 │ Na     │
    /// │ 0x04 │ Eu     │
    /// │ 0x05 │ Ru     │
    /// └──────┴────────┘
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Region {
        Kr = 0x00,
        Jp = 0x01,
        Tw = 0x02,
        Na = 0x03,
        Eu = 0x04,
        Ru = 0x05,
    }
}

// ── Direction ─────────────────────────────────────────────────────────

wire_enum! {
    /// Flow direction of a single captured packet, one byte per entry.
    ///
    /// ```text
    /// ┌──────┬────────────────┐
    /// │ Wire │ Direction      │
    /// ├──────┼────────────────┤
    /// │ 0x00 │ ClientToServer │
    /// │ 0x01 │ ServerToClient │
    /// └──────┴────────────────┘
    /// ```
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Direction {
        ClientToServer = 0x00,
        ServerToClient = 0x01,
    }
}
