//! Access-control gate.
//!
//! A pure function from (user, board) to a capability set. It is
//! re-evaluated on every render from current state and holds nothing;
//! the server applies the same rules, this gate only keeps the UI
//! honest about them.

use crate::types::{Board, Role, User};

/// What a user may do on a given board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub can_edit: bool,
    pub can_add_cards: bool,
    pub can_comment: bool,
}

impl Capabilities {
    pub const ALL: Self = Self {
        can_edit: true,
        can_add_cards: true,
        can_comment: true,
    };

    pub const NONE: Self = Self {
        can_edit: false,
        can_add_cards: false,
        can_comment: false,
    };
}

/// Compute the capability set for a user on a board.
pub fn capabilities(user: &User, board: &Board) -> Capabilities {
    let overlap = practices_overlap(&user.practices, &board.practices);
    let board_configured = !board.practices.is_empty();

    match user.role {
        Role::Admin | Role::Executive => Capabilities::ALL,
        Role::PracticeManager => {
            let can_edit = board_configured && overlap;
            Capabilities {
                can_edit,
                can_add_cards: can_edit,
                can_comment: can_edit,
            }
        }
        Role::PracticePrincipal => {
            let can_edit = board_configured && overlap;
            Capabilities {
                can_edit,
                can_add_cards: can_edit,
                can_comment: overlap,
            }
        }
        Role::PracticeMember => Capabilities {
            can_edit: false,
            can_add_cards: overlap,
            can_comment: overlap,
        },
        Role::Staff => Capabilities {
            can_edit: false,
            can_add_cards: false,
            can_comment: overlap,
        },
    }
}

/// Normalize a practice name for comparison: lowercase with all
/// whitespace removed, tolerating formatting drift between user
/// records and board configuration.
pub fn normalize_practice(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn practices_overlap(user: &[String], board: &[String]) -> bool {
    user.iter().any(|u| {
        let u = normalize_practice(u);
        board.iter().any(|b| normalize_practice(b) == u)
    })
}
