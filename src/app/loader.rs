//! Fan-out between gateway requests and the components waiting on them.
//!
//! Components ask the [`Loader`] for a page or a user and say who they are
//! via a waiter tag. Answers come back as [`Delivery`] values, either within
//! the same event (cache hit) or when the host reports the response. Several
//! waiters on the same key share one network request.

use crate::domain::{FetchError, Result, User, UserId, UserPage};
use crate::gateway::{ApiEndpoint, Fetch, HttpRequest, HttpResponse, Payload, RequestKey, UserGateway};
use std::collections::{HashMap, VecDeque};

/// Who asked for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWaiter {
    /// The list view instance mounted as `mount`.
    List { mount: u64 },
}

/// Who asked for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserWaiter {
    /// The list view showing a searched record.
    ListSearch { mount: u64 },
    /// Debounced existence check from the search box.
    InstantSearch { generation: u64 },
    /// Explicit submit from the search box.
    Submit { generation: u64 },
    /// The detail view opened as `visit`.
    Detail { visit: u64 },
}

/// A finished load addressed to one waiter.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Page {
        waiter: PageWaiter,
        page: u32,
        result: std::result::Result<UserPage, FetchError>,
    },
    User {
        waiter: UserWaiter,
        id: UserId,
        result: std::result::Result<User, FetchError>,
    },
}

#[derive(Debug)]
pub struct Loader {
    gateway: UserGateway,
    page_waiters: HashMap<u32, Vec<PageWaiter>>,
    user_waiters: HashMap<UserId, Vec<UserWaiter>>,
    ready: VecDeque<Delivery>,
    outbox: Vec<HttpRequest>,
}

impl Loader {
    #[must_use]
    pub fn new(endpoint: ApiEndpoint) -> Self {
        Self {
            gateway: UserGateway::new(endpoint),
            page_waiters: HashMap::new(),
            user_waiters: HashMap::new(),
            ready: VecDeque::new(),
            outbox: Vec::new(),
        }
    }

    pub fn load_page(&mut self, page: u32, waiter: PageWaiter) {
        match self.gateway.fetch_page(page) {
            Fetch::Ready(data) => self.ready.push_back(Delivery::Page {
                waiter,
                page,
                result: Ok(data),
            }),
            Fetch::Requested(request) => {
                self.outbox.push(request);
                self.page_waiters.entry(page).or_default().push(waiter);
            }
            Fetch::Joined => self.page_waiters.entry(page).or_default().push(waiter),
        }
    }

    pub fn load_user(&mut self, id: UserId, waiter: UserWaiter) {
        match self.gateway.fetch_by_id(id) {
            Fetch::Ready(user) => self.ready.push_back(Delivery::User {
                waiter,
                id,
                result: Ok(user),
            }),
            Fetch::Requested(request) => {
                self.outbox.push(request);
                self.user_waiters.entry(id).or_default().push(waiter);
            }
            Fetch::Joined => self.user_waiters.entry(id).or_default().push(waiter),
        }
    }

    /// Routes a host response to everyone waiting on its key.
    ///
    /// # Errors
    ///
    /// Propagates [`UserGateway::complete`] failures for responses that carry
    /// no request key.
    pub fn complete(&mut self, response: &HttpResponse) -> Result<()> {
        let completion = self.gateway.complete(response)?;

        match completion.key {
            RequestKey::Page(page) => {
                let result = match completion.outcome {
                    Ok(Payload::Page(data)) => Ok(data),
                    Ok(Payload::User(_)) => Err(mismatched(completion.key)),
                    Err(e) => Err(e),
                };
                for waiter in self.page_waiters.remove(&page).unwrap_or_default() {
                    self.ready.push_back(Delivery::Page {
                        waiter,
                        page,
                        result: result.clone(),
                    });
                }
            }
            RequestKey::User(id) => {
                let result = match completion.outcome {
                    Ok(Payload::User(user)) => Ok(user),
                    Ok(Payload::Page(_)) => Err(mismatched(completion.key)),
                    Err(e) => Err(e),
                };
                for waiter in self.user_waiters.remove(&id).unwrap_or_default() {
                    self.ready.push_back(Delivery::User {
                        waiter,
                        id,
                        result: result.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Next answer waiting to be handed out, oldest first.
    pub fn next_delivery(&mut self) -> Option<Delivery> {
        self.ready.pop_front()
    }

    /// Requests issued since the last call, for the host to send.
    pub fn take_requests(&mut self) -> Vec<HttpRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Whether any request is still on the wire.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.gateway.is_busy()
    }
}

fn mismatched(key: RequestKey) -> FetchError {
    FetchError::Transport(format!("Unexpected payload for {key}"))
}
