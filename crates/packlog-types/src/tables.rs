//! The opcode universe: per-client-version message tables.
//!
//! Packet opcodes are bare `u16`s on the wire and mean nothing outside
//! a specific client protocol version — the game reassigns the numbers
//! with every client release. A log therefore records the client
//! version it was captured under, and the codec resolves that version
//! to an immutable opcode↔name table before decoding any entry.
//!
//! The tables are closed registries built from const data at startup.
//! Nothing is discovered at runtime and nothing can be registered after
//! the fact; an opcode either exists for a version or it does not.

use std::collections::HashMap;

/// Client protocol versions this build ships tables for.
pub const KNOWN_CLIENT_VERSIONS: [i32; 2] = [353701, 356005];

// Opcode assignments per client version. The name set overlaps heavily
// between releases but the numbers do not — that shuffle is exactly why
// resolution is version-keyed.
const GAME_MESSAGES_353701: &[(u16, &str)] = &[
    (0x9E17, "C_CHECK_VERSION"),
    (0xB003, "S_CHECK_VERSION"),
    (0xA4C2, "C_LOGIN_ARBITER"),
    (0xBF31, "S_LOGIN_ARBITER"),
    (0xC855, "S_LOGIN_ACCOUNT_INFO"),
    (0x9A40, "C_GET_USER_LIST"),
    (0xAD2E, "S_GET_USER_LIST"),
    (0xB68A, "C_SELECT_USER"),
    (0xCE09, "S_SPAWN_ME"),
    (0xD17C, "S_SPAWN_USER"),
    (0xD3E8, "S_SPAWN_NPC"),
    (0xD46B, "S_DESPAWN_NPC"),
    (0xA1F5, "C_PLAYER_LOCATION"),
    (0xAB90, "C_CHAT"),
    (0xC2D4, "S_CHAT"),
    (0xB911, "C_WHISPER"),
    (0xC75A, "S_WHISPER"),
    (0x89FD, "S_SYSTEM_MESSAGE"),
    (0x8E06, "S_PING"),
    (0x93BB, "C_PONG"),
    (0x97A8, "S_EXIT"),
];

const GAME_MESSAGES_356005: &[(u16, &str)] = &[
    (0xAF22, "C_CHECK_VERSION"),
    (0x8C60, "S_CHECK_VERSION"),
    (0xD90B, "C_LOGIN_ARBITER"),
    (0x9274, "S_LOGIN_ARBITER"),
    (0xA88F, "S_LOGIN_ACCOUNT_INFO"),
    (0xCB13, "C_GET_USER_LIST"),
    (0x85D1, "S_GET_USER_LIST"),
    (0x9FE4, "C_SELECT_USER"),
    (0xB7A6, "S_SPAWN_ME"),
    (0x8A3D, "S_SPAWN_USER"),
    (0xC4F0, "S_SPAWN_NPC"),
    (0xC52D, "S_DESPAWN_NPC"),
    (0xDD58, "C_PLAYER_LOCATION"),
    (0x96C7, "C_CHAT"),
    (0xA30A, "S_CHAT"),
    (0xD2B9, "C_WHISPER"),
    (0x8812, "S_WHISPER"),
    (0xBA45, "S_SYSTEM_MESSAGE"),
    (0xADEE, "S_PING"),
    (0xB599, "C_PONG"),
    (0x9C81, "S_EXIT"),
];

/// Immutable opcode↔name lookup for one client version.
///
/// Query-only: the codec asks "is this numeric code known" and callers
/// may ask for names when presenting entries. Nothing mutates a built
/// table.
#[derive(Clone, Debug)]
pub struct GameMessageTable {
    by_op_code: HashMap<u16, &'static str>,
    by_name: HashMap<&'static str, u16>,
}

impl GameMessageTable {
    fn from_entries(entries: &[(u16, &'static str)]) -> Self {
        let by_op_code = entries.iter().copied().collect();
        let by_name = entries.iter().map(|&(op, name)| (name, op)).collect();
        Self {
            by_op_code,
            by_name,
        }
    }

    /// Whether the numeric opcode exists for this client version.
    #[must_use]
    pub fn contains_op_code(&self, op_code: u16) -> bool {
        self.by_op_code.contains_key(&op_code)
    }

    /// Symbolic name of a numeric opcode, if defined.
    #[must_use]
    pub fn name_of(&self, op_code: u16) -> Option<&'static str> {
        self.by_op_code.get(&op_code).copied()
    }

    /// Numeric opcode of a symbolic name, if defined.
    #[must_use]
    pub fn op_code_of(&self, name: &str) -> Option<u16> {
        self.by_name.get(name).copied()
    }

    /// Number of opcodes defined for this version.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_op_code.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_op_code.is_empty()
    }

    /// Iterate all `(op_code, name)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &'static str)> + '_ {
        self.by_op_code.iter().map(|(&op, &name)| (op, name))
    }
}

/// The resolved message tables for one client protocol version.
///
/// Today this holds only the game-message table; the system-message
/// table the original capture tooling also carried has no bearing on
/// log decoding and is not recorded.
#[derive(Clone, Debug)]
pub struct MessageTables {
    client_version: i32,
    game: GameMessageTable,
}

impl MessageTables {
    /// Resolve a client protocol version to its message tables.
    ///
    /// Returns `None` for versions this build has no tables for. For a
    /// version in [`KNOWN_CLIENT_VERSIONS`] resolution always succeeds.
    #[must_use]
    pub fn for_version(client_version: i32) -> Option<Self> {
        let entries = match client_version {
            353701 => GAME_MESSAGES_353701,
            356005 => GAME_MESSAGES_356005,
            _ => return None,
        };

        Some(Self {
            client_version,
            game: GameMessageTable::from_entries(entries),
        })
    }

    /// Whether this build ships tables for the given client version.
    #[must_use]
    pub fn is_known_version(client_version: i32) -> bool {
        KNOWN_CLIENT_VERSIONS.contains(&client_version)
    }

    /// The client version these tables were resolved for.
    #[must_use]
    pub fn client_version(&self) -> i32 {
        self.client_version
    }

    /// The game-message opcode table.
    #[must_use]
    pub fn game(&self) -> &GameMessageTable {
        &self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_version_resolves() {
        for version in KNOWN_CLIENT_VERSIONS {
            let tables = MessageTables::for_version(version)
                .unwrap_or_else(|| panic!("version {version} should resolve"));
            assert_eq!(tables.client_version(), version);
            assert!(!tables.game().is_empty());
        }
    }

    #[test]
    fn unknown_version_does_not_resolve() {
        assert!(MessageTables::for_version(0).is_none());
        assert!(MessageTables::for_version(349999).is_none());
        assert!(!MessageTables::is_known_version(349999));
    }

    #[test]
    fn lookup_is_bidirectional() {
        let tables = MessageTables::for_version(353701).unwrap();
        let game = tables.game();

        let op = game.op_code_of("S_PING").unwrap();
        assert_eq!(op, 0x8E06);
        assert_eq!(game.name_of(op), Some("S_PING"));
        assert!(game.contains_op_code(op));
    }

    #[test]
    fn opcode_numbers_shuffle_between_versions() {
        let old = MessageTables::for_version(353701).unwrap();
        let new = MessageTables::for_version(356005).unwrap();

        let old_ping = old.game().op_code_of("S_PING").unwrap();
        let new_ping = new.game().op_code_of("S_PING").unwrap();
        assert_ne!(old_ping, new_ping);

        // The old number is not guaranteed to mean anything in the new
        // version — here it happens to be undefined.
        assert!(!new.game().contains_op_code(old_ping));
    }

    #[test]
    fn tables_have_no_duplicate_opcodes() {
        for entries in [GAME_MESSAGES_353701, GAME_MESSAGES_356005] {
            let table = GameMessageTable::from_entries(entries);
            assert_eq!(table.len(), entries.len(), "duplicate opcode in const data");
        }
    }

    #[test]
    fn undefined_opcode_is_absent() {
        let tables = MessageTables::for_version(356005).unwrap();
        assert!(!tables.game().contains_op_code(0x0000));
        assert_eq!(tables.game().name_of(0x0000), None);
        assert_eq!(tables.game().op_code_of("C_NO_SUCH_MESSAGE"), None);
    }
}
