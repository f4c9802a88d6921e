mod all;
mod chat;
mod detail;
mod events;
mod footer;
mod form;
mod locations;
mod log;
mod login;

use self::log::log;
use super::*;
use chat::chat;
use detail::detail;
use events::{events, schedule};
use footer::footer;
use form::form;
use locations::locations;
use login::{login, signup};

pub use all::all as render;
