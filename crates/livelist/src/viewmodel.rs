//! The view-model actor and its handle.
//!
//! All list state lives in one Tokio task. Callers talk to it through a
//! [`LiveListHandle`]; request handlers talk to it through a weak sender.
//! Every store mutation, publish, and callback runs inside that task, one
//! command at a time, so nothing here needs a lock.

use livelist_protocol::{Category, Room};
use livelist_store::ListState;
use livelist_transport::{RequestClient, TokenProvider};
use tokio::sync::{mpsc, oneshot, watch};

use crate::fetcher::{CompletionLink, FetchCompletion, ListFetcher};
use crate::{FetchOptions, FetchOutcome, ListConfig, LiveListError};

/// Commands processed by the view-model task.
pub(crate) enum Command {
    SetActive {
        category: Category,
        reply: oneshot::Sender<()>,
    },
    Active {
        reply: oneshot::Sender<Category>,
    },
    Snapshot {
        category: Category,
        reply: oneshot::Sender<Vec<Room>>,
    },
    Presenting {
        reply: oneshot::Sender<Vec<Room>>,
    },
    Subscribe {
        reply: oneshot::Sender<watch::Receiver<Vec<Room>>>,
    },
    Append {
        category: Category,
        rooms: Vec<Room>,
        reply: oneshot::Sender<()>,
    },
    Replace {
        category: Category,
        rooms: Vec<Room>,
        reply: oneshot::Sender<()>,
    },
    FetchNextPage {
        options: FetchOptions,
        reply: oneshot::Sender<FetchOutcome>,
    },
    Refetch {
        options: FetchOptions,
        reply: oneshot::Sender<FetchOutcome>,
    },
    InFlight {
        reply: oneshot::Sender<usize>,
    },
    /// A request finished; posted by its handler.
    Completed(FetchCompletion),
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

// ---------------------------------------------------------------------------
// LiveListHandle
// ---------------------------------------------------------------------------

/// Handle to a running view-model.
///
/// Cheap to clone. The view-model stops when every handle is dropped or
/// [`shutdown`](Self::shutdown) is called; results of requests still in
/// flight at that point are discarded and their callbacks never run.
#[derive(Debug, Clone)]
pub struct LiveListHandle {
    sender: mpsc::UnboundedSender<Command>,
}

impl LiveListHandle {
    async fn call<R>(
        &self,
        command: impl FnOnce(oneshot::Sender<R>) -> Command,
    ) -> Result<R, LiveListError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .map_err(|_| LiveListError::Unavailable)?;
        reply_rx.await.map_err(|_| LiveListError::Unavailable)
    }

    /// Makes `category` the presenting one and republishes its content.
    pub async fn set_active(
        &self,
        category: Category,
    ) -> Result<(), LiveListError> {
        self.call(|reply| Command::SetActive { category, reply }).await
    }

    pub async fn active(&self) -> Result<Category, LiveListError> {
        self.call(|reply| Command::Active { reply }).await
    }

    /// Current content of any category, presenting or not.
    pub async fn snapshot(
        &self,
        category: Category,
    ) -> Result<Vec<Room>, LiveListError> {
        self.call(|reply| Command::Snapshot { category, reply }).await
    }

    /// Current value of the presenting list.
    pub async fn presenting(&self) -> Result<Vec<Room>, LiveListError> {
        self.call(|reply| Command::Presenting { reply }).await
    }

    /// Subscribes to the presenting list. The receiver starts out holding
    /// the current value.
    pub async fn subscribe(
        &self,
    ) -> Result<watch::Receiver<Vec<Room>>, LiveListError> {
        self.call(|reply| Command::Subscribe { reply }).await
    }

    /// Appends locally created rooms to a category.
    pub async fn insert_rooms(
        &self,
        category: Category,
        rooms: Vec<Room>,
    ) -> Result<(), LiveListError> {
        self.call(|reply| Command::Append {
            category,
            rooms,
            reply,
        })
        .await
    }

    /// Replaces a category's content with locally created rooms.
    pub async fn replace_rooms(
        &self,
        category: Category,
        rooms: Vec<Room>,
    ) -> Result<(), LiveListError> {
        self.call(|reply| Command::Replace {
            category,
            rooms,
            reply,
        })
        .await
    }

    /// Fetches the page after the last room of the active category and
    /// appends it.
    ///
    /// Returns once the request is issued, not when it completes. If the
    /// active category is empty nothing is sent and
    /// [`FetchOutcome::Skipped`] is returned.
    pub async fn fetch_next_page(
        &self,
        options: FetchOptions,
    ) -> Result<FetchOutcome, LiveListError> {
        self.call(|reply| Command::FetchNextPage { options, reply })
            .await
    }

    /// Fetches the active category from the start and replaces its
    /// content. Asks for at least as many rooms as are displayed.
    pub async fn refetch(
        &self,
        options: FetchOptions,
    ) -> Result<FetchOutcome, LiveListError> {
        self.call(|reply| Command::Refetch { options, reply }).await
    }

    /// Number of requests issued but not yet completed.
    pub async fn in_flight(&self) -> Result<usize, LiveListError> {
        self.call(|reply| Command::InFlight { reply }).await
    }

    /// Stops the view-model.
    pub async fn shutdown(&self) -> Result<(), LiveListError> {
        self.call(|reply| Command::Shutdown { reply }).await
    }
}

// ---------------------------------------------------------------------------
// LiveListVm
// ---------------------------------------------------------------------------

/// Entry point for creating a view-model.
///
/// ```rust,ignore
/// let handle = LiveListVm::builder()
///     .config(config)
///     .initial_category(Category::Single)
///     .spawn(client, tokens);
/// ```
pub struct LiveListVm;

impl LiveListVm {
    pub fn builder() -> LiveListVmBuilder {
        LiveListVmBuilder::new()
    }
}

/// Builder for a [`LiveListVm`] task.
#[derive(Debug, Clone, Default)]
pub struct LiveListVmBuilder {
    config: ListConfig,
    initial: Category,
}

impl LiveListVmBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    /// Category presenting at start. Default: [`Category::Multi`].
    pub fn initial_category(mut self, category: Category) -> Self {
        self.initial = category;
        self
    }

    /// Spawns the view-model task on the current Tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<C, T>(self, client: C, tokens: T) -> LiveListHandle
    where
        C: RequestClient,
        T: TokenProvider,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = LiveListActor {
            state: ListState::new(self.initial),
            fetcher: ListFetcher::new(
                client,
                tokens,
                self.config,
                CompletionLink::new(&tx),
            ),
            receiver: rx,
        };

        tokio::spawn(actor.run());

        LiveListHandle { sender: tx }
    }
}

/// The task-owned state.
struct LiveListActor<C: RequestClient, T: TokenProvider> {
    state: ListState,
    fetcher: ListFetcher<C, T>,
    receiver: mpsc::UnboundedReceiver<Command>,
}

impl<C: RequestClient, T: TokenProvider> LiveListActor<C, T> {
    async fn run(mut self) {
        tracing::info!(category = %self.state.active(), "live list started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                Command::SetActive { category, reply } => {
                    self.state.set_active(category);
                    let _ = reply.send(());
                }
                Command::Active { reply } => {
                    let _ = reply.send(self.state.active());
                }
                Command::Snapshot { category, reply } => {
                    let _ = reply.send(self.state.store().get(category).to_vec());
                }
                Command::Presenting { reply } => {
                    let _ = reply.send(self.state.presenting());
                }
                Command::Subscribe { reply } => {
                    let _ = reply.send(self.state.subscribe());
                }
                Command::Append {
                    category,
                    rooms,
                    reply,
                } => {
                    self.state.append(category, rooms);
                    let _ = reply.send(());
                }
                Command::Replace {
                    category,
                    rooms,
                    reply,
                } => {
                    self.state.replace(category, rooms);
                    let _ = reply.send(());
                }
                Command::FetchNextPage { options, reply } => {
                    let outcome =
                        self.fetcher.fetch_next_page(&self.state, options);
                    let _ = reply.send(outcome);
                }
                Command::Refetch { options, reply } => {
                    let outcome = self.fetcher.refetch(&self.state, options);
                    let _ = reply.send(outcome);
                }
                Command::InFlight { reply } => {
                    let _ = reply.send(self.fetcher.in_flight());
                }
                Command::Completed(completion) => {
                    self.fetcher.complete(&mut self.state, completion);
                }
                Command::Shutdown { reply } => {
                    tracing::info!("live list shutting down");
                    let _ = reply.send(());
                    break;
                }
            }
        }

        tracing::info!(
            abandoned = self.fetcher.in_flight(),
            "live list stopped"
        );
    }
}
