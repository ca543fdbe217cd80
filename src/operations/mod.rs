//! The eSputnik operation surface.
//!
//! A static table of [`OperationDefinition`]s is compiled once into a
//! [`Namespace`] tree addressed by dotted names (`contact.subscribe`,
//! `emails.unsubscribed.add`, ...). Binding a node to an
//! [`HttpClient`](crate::clients::HttpClient) yields a [`Scope`], whose
//! leaves are callable [`Operation`]s.
//!
//! # URL Construction
//!
//! Request URLs have the form `{host}/api/{version}/{path}`, where every
//! `{{id}}` in the path template is replaced by the call's id. See
//! [`build_url`].

mod bound;
mod namespace;
mod path;
mod table;

pub use bound::{Operation, Scope};
pub use namespace::Namespace;
pub use path::{build_url, substitute_id, ID_PLACEHOLDER};
pub use table::{OperationDefinition, CONTACTS_OPERATION, OPERATIONS};
