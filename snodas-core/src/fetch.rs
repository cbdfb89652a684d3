//! Request tokens so a slow response never overwrites a newer one.

use std::collections::HashMap;

use crate::error::SnodasError;

/// The kinds of remote listings the map pages load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Boundaries,
    Pourpoints,
    TileDates,
}

impl FetchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::Boundaries => "boundaries",
            FetchKind::Pourpoints => "pourpoints",
            FetchKind::TileDates => "tile dates",
        }
    }
}

/// Issued when a request starts; presented again when its response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub kind: FetchKind,
    pub generation: u64,
}

/// Latest issued generation per fetch kind.
#[derive(Debug, Clone, Default)]
pub struct FetchGenerations {
    latest: HashMap<FetchKind, u64>,
}

impl FetchGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request of `kind`, superseding any in flight.
    pub fn issue(&mut self, kind: FetchKind) -> RequestToken {
        let generation = self.latest.entry(kind).or_insert(0);
        *generation += 1;
        RequestToken {
            kind,
            generation: *generation,
        }
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.get(&token.kind) == Some(&token.generation)
    }

    /// `Ok` when the response for `token` may be applied.
    pub fn accept(&self, token: RequestToken) -> Result<(), SnodasError> {
        if self.is_latest(token) {
            Ok(())
        } else {
            Err(SnodasError::StaleResponse(token.kind))
        }
    }
}
