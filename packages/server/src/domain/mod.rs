//! ドメイン層
//!
//! 値オブジェクト、エンティティ、外部依存の抽象（trait）と、
//! 副作用を持たない純粋なロジック（メッセージ整形・配送経路の選択）を定義します。

pub mod counter;
pub mod delivery;
pub mod error;
pub mod formatter;
pub mod job_order;
pub mod notifier;
pub mod pusher;
pub mod value_object;

pub use counter::VisitorCounter;
pub use delivery::{Delivery, PhotoSource};
pub use error::{CounterError, DomainError, RelayError};
pub use formatter::{FormattedMessage, format_job_order};
pub use job_order::{JobOrder, JobOrderFields, MAX_ATTACHMENTS, NOT_SPECIFIED, OTHER_UNIT_SENTINEL};
pub use notifier::Notifier;
pub use pusher::{MessagePusher, PusherChannel};
pub use value_object::{Attachment, ConnectionId, VisitorCount};
