//! # Shop Store
//!
//! 應用工作階段的資料存放：持有目前快照與設定，
//! 透過對帳引擎套用異動，並提供備份匯入/匯出。

pub mod backup;
pub mod clock;
pub mod seed;
pub mod session;
pub mod store;

// Re-export 主要類型
pub use backup::{Backup, BackupFile};
pub use clock::{Clock, FixedClock, SystemClock};
pub use session::{InMemorySession, SessionProvider, SessionStatus};
pub use store::{AppliedChange, ShopStore, RESET_KEYWORD};
