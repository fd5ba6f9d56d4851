//! Services layer - Business logic
//!
//! This module contains the business logic for the Vestnik service:
//! - Access-control policy for owned content
//! - Comment moderation against the banned-word list
//! - Slug derivation and collision handling for notes
//! - User registration, login and session validation

pub mod access;
pub mod comment;
pub mod moderation;
pub mod news;
pub mod note;
pub mod password;
pub mod slug;
pub mod user;

pub use access::{comment_access, note_access, AccessDecision, Operation};
pub use comment::{CommentService, CommentServiceError};
pub use moderation::{validate_comment_text, ModerationError, BAD_WORDS, WARNING};
pub use news::NewsService;
pub use note::{NoteService, NoteServiceError, SLUG_WARNING};
pub use password::{hash_password, verify_password};
pub use slug::slugify;
pub use user::{UserService, UserServiceError};
