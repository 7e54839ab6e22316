//! Property tests for roster membership and session codes.

use std::collections::HashSet;

use proptest::prelude::*;

use planning_poker::application::SessionRegistry;
use planning_poker::domain::foundation::ConnectionId;
use planning_poker::domain::session::{
    CardPreset, CardValues, Session, SessionCode, SessionError, CODE_ALPHABET, CODE_LENGTH,
};

fn fresh_session() -> (Session, ConnectionId) {
    let admin = ConnectionId::new();
    let code = SessionCode::parse("ABCDE").unwrap();
    let session = Session::new(
        code,
        "Sprint 1",
        admin,
        "Admin",
        CardValues::from_preset(CardPreset::Fibonacci),
    );
    (session, admin)
}

proptest! {
    #[test]
    fn distinct_names_grow_the_roster(names in prop::collection::hash_set("[a-z]{1,8}", 1..12)) {
        let (mut session, admin) = fresh_session();

        for name in &names {
            session.join(ConnectionId::new(), name.clone()).unwrap();
        }

        prop_assert_eq!(session.player_count(), names.len() + 1);
        prop_assert_eq!(session.admin_id(), admin);
        prop_assert_eq!(session.players()[0].id(), admin);
    }

    #[test]
    fn duplicate_name_leaves_roster_unchanged(names in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let (mut session, _) = fresh_session();
        let mut seen = HashSet::new();

        for name in &names {
            let before = session.player_count();
            let result = session.join(ConnectionId::new(), name.clone());
            if seen.insert(name.clone()) {
                prop_assert!(result.is_ok());
                prop_assert_eq!(session.player_count(), before + 1);
            } else {
                prop_assert!(matches!(result, Err(SessionError::DuplicateName(_))));
                prop_assert_eq!(session.player_count(), before);
            }
        }
    }

    #[test]
    fn removing_the_admin_promotes_the_oldest_player(extra in 1usize..8) {
        let (mut session, admin) = fresh_session();
        let ids: Vec<ConnectionId> = (0..extra).map(|_| ConnectionId::new()).collect();
        for (i, id) in ids.iter().enumerate() {
            session.join(*id, format!("player-{}", i)).unwrap();
        }

        session.remove_player(admin);

        prop_assert_eq!(session.admin_id(), ids[0]);
        prop_assert_eq!(session.player_count(), extra);
    }

    #[test]
    fn generated_codes_are_well_formed(seed in any::<u64>(), count in 1usize..20) {
        let mut registry = SessionRegistry::with_seed(seed);
        let mut codes = HashSet::new();

        for _ in 0..count {
            let code = registry
                .create(
                    "S",
                    ConnectionId::new(),
                    "Alice",
                    CardValues::from_preset(CardPreset::Fibonacci),
                )
                .code()
                .clone();
            prop_assert_eq!(code.as_str().len(), CODE_LENGTH);
            prop_assert!(code.as_str().bytes().all(|b| CODE_ALPHABET.contains(&b)));
            codes.insert(code);
        }

        prop_assert_eq!(codes.len(), count);
        prop_assert_eq!(registry.len(), count);
    }

    #[test]
    fn parsed_codes_ignore_case_and_padding(raw in "[A-Z0-9]{5}") {
        let padded = format!("  {}\t", raw.to_lowercase());
        let parsed = SessionCode::parse(&padded).unwrap();
        prop_assert_eq!(parsed.as_str(), raw.as_str());
    }
}
