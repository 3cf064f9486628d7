use crate::domain::AgendaError;
use crate::ports::BackingStore;

/// Short-circuit every request while the backing store is not ready.
pub fn ensure_available(backing: &dyn BackingStore) -> Result<(), AgendaError> {
    if backing.is_ready() {
        Ok(())
    } else {
        Err(AgendaError::UpstreamUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ReadinessFlag;

    #[test]
    fn follows_readiness_flag() {
        let flag = ReadinessFlag::new(false);
        assert!(matches!(
            ensure_available(&flag),
            Err(AgendaError::UpstreamUnavailable)
        ));

        flag.mark_ready();
        assert!(ensure_available(&flag).is_ok());
    }
}
