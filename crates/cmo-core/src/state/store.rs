use super::events::Event;
use super::types::Command;

/// Trait for dispatching operator commands.
///
/// Decouples command definitions from their execution. Interfaces (the
/// dashboard shell, test harnesses) implement or hold this trait to
/// execute commands with their specific needs.
///
/// # Semantics
///
/// - **Ordering**: Commands execute in the order received. No implicit
///   batching.
/// - **Idempotency**: Commands are not idempotent in general (e.g.
///   `ResolverAlerta` fails on an already-resolved alert). Callers must
///   avoid duplicate dispatches.
/// - **Events**: On success, dispatch returns a non-empty `Vec<Event>`
///   describing what changed, in chronological order. The event vector is
///   the notification mechanism: callers react to it instead of polling
///   or re-reading store state. Failures use the `Result` error channel,
///   never the event stream.
pub trait Store {
    type Error;
    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_trait_is_implementable() {
        struct TestStore;
        impl Store for TestStore {
            type Error = String;
            fn dispatch(&mut self, _cmd: Command) -> Result<Vec<Event>, String> {
                Ok(vec![Event::AlertaAtendida {
                    id: "a-1".to_string(),
                }])
            }
        }
        let mut store = TestStore;
        let result = store.dispatch(Command::AtenderAlerta {
            id: "a-1".to_string(),
            usuario: "maria".to_string(),
        });
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_store_impl_can_return_error() {
        struct FailingStore;
        impl Store for FailingStore {
            type Error = String;
            fn dispatch(&mut self, _cmd: Command) -> Result<Vec<Event>, String> {
                Err("not implemented".to_string())
            }
        }
        let mut store = FailingStore;
        let result = store.dispatch(Command::AtenderAlerta {
            id: "a-1".to_string(),
            usuario: "maria".to_string(),
        });
        assert!(result.is_err());
    }
}
