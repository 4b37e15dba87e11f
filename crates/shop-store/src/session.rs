//! 身分驗證工作階段
//!
//! 驗證本身由外部身分提供者處理，這裡只定義查詢狀態與登出的介面。

use serde::Serialize;

/// 工作階段狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub is_authenticated: bool,
}

/// 外部身分提供者
pub trait SessionProvider: Send + Sync {
    /// 查詢目前工作階段狀態
    fn status(&self) -> SessionStatus;

    /// 登出
    fn sign_out(&mut self);
}

/// 記憶體中的工作階段
#[derive(Debug, Clone, Default)]
pub struct InMemorySession {
    user: Option<String>,
}

impl InMemorySession {
    /// 已登入的工作階段
    pub fn signed_in(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl SessionProvider for InMemorySession {
    fn status(&self) -> SessionStatus {
        SessionStatus {
            is_authenticated: self.user.is_some(),
        }
    }

    fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("使用者 {} 已登出", user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_out() {
        let mut session = InMemorySession::signed_in("oficina@example.com");
        assert!(session.status().is_authenticated);

        session.sign_out();
        assert!(!session.status().is_authenticated);
        assert_eq!(session.user(), None);

        session.sign_out();
        assert!(!session.status().is_authenticated);
    }
}
