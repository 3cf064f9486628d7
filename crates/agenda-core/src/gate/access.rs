//! Access gate: who may reach the agenda, and who should skip the login flow.

/// Where a request path falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Agenda pages and the record API (needs a session).
    Protected,
    /// The OAuth handshake.
    AuthFlow,
    Other,
}

/// Outcome of the access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Anonymous caller on a protected path.
    RedirectHome,
    /// Authenticated caller re-entering the login flow.
    RedirectAgenda,
}

/// Stateless per-request access decision.
///
/// | path class | session | decision |
/// |---|---|---|
/// | Protected | no | RedirectHome |
/// | Protected | yes | Allow |
/// | AuthFlow | yes | RedirectAgenda |
/// | AuthFlow | no | Allow |
/// | Other | any | Allow |
#[derive(Debug, Clone)]
pub struct AccessGate {
    protected_prefix: String,
    auth_prefix: String,
}

impl AccessGate {
    pub const HOME: &'static str = "/";

    pub fn new(protected_prefix: impl Into<String>, auth_prefix: impl Into<String>) -> Self {
        Self {
            protected_prefix: protected_prefix.into(),
            auth_prefix: auth_prefix.into(),
        }
    }

    /// Root of the protected area; where authenticated users land.
    pub fn protected_root(&self) -> &str {
        &self.protected_prefix
    }

    pub fn auth_prefix(&self) -> &str {
        &self.auth_prefix
    }

    /// Classify a decoded request path.
    ///
    /// Empty and `.` segments are dropped and `..` is resolved first, so
    /// `//agenda/` and `/x/../agenda` land in the same class as `/agenda/`.
    pub fn classify_path(&self, path: &str) -> PathClass {
        let path = canonical_path(path);
        if has_segment_prefix(&path, &self.protected_prefix) {
            PathClass::Protected
        } else if has_segment_prefix(&path, &self.auth_prefix) {
            PathClass::AuthFlow
        } else {
            PathClass::Other
        }
    }

    pub fn decide(&self, path: &str, has_session: bool) -> GateDecision {
        match (self.classify_path(path), has_session) {
            (PathClass::Protected, false) => GateDecision::RedirectHome,
            (PathClass::AuthFlow, true) => GateDecision::RedirectAgenda,
            _ => GateDecision::Allow,
        }
    }

    /// Redirect target for a decision, `None` for `Allow`.
    pub fn location(&self, decision: GateDecision) -> Option<&str> {
        match decision {
            GateDecision::Allow => None,
            GateDecision::RedirectHome => Some(Self::HOME),
            GateDecision::RedirectAgenda => Some(self.protected_root()),
        }
    }
}

/// `/a//b/./c/../d/` -> `/a/b/d`. `..` never climbs above the root.
pub fn canonical_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}

/// `/agenda` matches `/agenda` and `/agenda/...` but not `/agendas`.
fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
