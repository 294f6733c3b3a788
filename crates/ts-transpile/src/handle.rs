//! Lazily created, shared engine instance.

use crate::engine::{EngineFactory, EngineInitError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

type InitResult<E> = Result<Arc<E>, EngineInitError>;

enum State<E> {
    Uninitialized,
    /// An attempt is in flight; its outcome is published on the channel.
    Initializing(watch::Receiver<Option<InitResult<E>>>),
    Ready(Arc<E>),
}

enum Step<E> {
    Ready(Arc<E>),
    Wait(watch::Receiver<Option<InitResult<E>>>),
    Initialize(watch::Sender<Option<InitResult<E>>>),
}

/// Holds the engine once it has been created.
///
/// The first caller creates the engine; callers arriving meanwhile wait for
/// that attempt and share its outcome. A failed attempt leaves the handle
/// uninitialized, so the next call tries again.
pub(crate) struct EngineHandle<E> {
    state: Mutex<State<E>>,
}

impl<E: Send + Sync + 'static> EngineHandle<E> {
    pub(crate) const fn new() -> Self {
        Self {
            state: Mutex::new(State::Uninitialized),
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        matches!(*lock(&self.state), State::Ready(_))
    }

    /// Returns the engine, creating it with `factory` if needed.
    pub(crate) async fn get_or_init<F>(&self, factory: &F) -> InitResult<E>
    where
        F: EngineFactory<Engine = E>,
    {
        loop {
            let step = {
                let mut state = lock(&self.state);
                match &*state {
                    State::Ready(engine) => Step::Ready(Arc::clone(engine)),
                    State::Initializing(pending) => Step::Wait(pending.clone()),
                    State::Uninitialized => {
                        let (publish, pending) = watch::channel(None);
                        *state = State::Initializing(pending);
                        Step::Initialize(publish)
                    }
                }
            };

            match step {
                Step::Ready(engine) => return Ok(engine),
                Step::Initialize(publish) => return self.initialize(factory, publish).await,
                Step::Wait(mut pending) => {
                    let outcome = match pending.wait_for(Option::is_some).await {
                        Ok(outcome) => (*outcome).clone(),
                        // The initializing caller went away; start over.
                        Err(_) => None,
                    };
                    if let Some(outcome) = outcome {
                        return outcome;
                    }
                }
            }
        }
    }

    async fn initialize<F>(
        &self,
        factory: &F,
        publish: watch::Sender<Option<InitResult<E>>>,
    ) -> InitResult<E>
    where
        F: EngineFactory<Engine = E>,
    {
        let reset = ResetOnDrop {
            state: &self.state,
            armed: true,
        };

        tracing::debug!("initializing transpilation engine");
        let outcome = factory.create().await.map(Arc::new);

        {
            let mut state = lock(&self.state);
            *state = match &outcome {
                Ok(engine) => State::Ready(Arc::clone(engine)),
                Err(_) => State::Uninitialized,
            };
        }
        reset.disarm();

        if outcome.is_ok() {
            tracing::debug!("transpilation engine ready");
        }
        publish.send_replace(Some(outcome.clone()));
        outcome
    }
}

/// Returns the handle to `Uninitialized` if an attempt is abandoned mid-flight.
struct ResetOnDrop<'a, E> {
    state: &'a Mutex<State<E>>,
    armed: bool,
}

impl<E> ResetOnDrop<'_, E> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<E> Drop for ResetOnDrop<'_, E> {
    fn drop(&mut self) {
        if self.armed {
            *lock(self.state) = State::Uninitialized;
        }
    }
}

fn lock<E>(state: &Mutex<State<E>>) -> MutexGuard<'_, State<E>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
