//! User-visible texts for the chat widget
//!
//! Every notification and label the engine produces goes through [`Text`], so
//! the fallback messages shown when the server sends no message of its own are
//! translated in one place.

use serde::{Deserialize, Serialize};

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Vi,
}

/// Keys for user-visible texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    LoadSessionsFailed,
    LoadHistoryFailed,
    CreateSessionFailed,
    SessionCreated,
    SendFailed,
    DeleteSessionFailed,
    SessionDeleted,
    DeleteAllFailed,
    AllSessionsDeleted,
    LoginRequired,
    NewSessionLabel,
    ConfirmDelete,
    ConfirmDeleteAll,
    JustNow,
}

impl Locale {
    /// Look up a fixed text
    pub fn text(self, key: Text) -> &'static str {
        match self {
            Locale::En => match key {
                Text::LoadSessionsFailed => "Could not load conversations",
                Text::LoadHistoryFailed => "Could not load chat history",
                Text::CreateSessionFailed => "Could not create a new conversation",
                Text::SessionCreated => "New conversation created",
                Text::SendFailed => "Could not send the message. Please try again",
                Text::DeleteSessionFailed => "Could not delete the conversation",
                Text::SessionDeleted => "Conversation deleted",
                Text::DeleteAllFailed => "Could not delete the chat history",
                Text::AllSessionsDeleted => "All chat history deleted",
                Text::LoginRequired => "Please sign in to use AI Chat",
                Text::NewSessionLabel => "New",
                Text::ConfirmDelete => "Delete this conversation?",
                Text::ConfirmDeleteAll => {
                    "Delete ALL chat history? This action cannot be undone!"
                }
                Text::JustNow => "just now",
            },
            Locale::Vi => match key {
                Text::LoadSessionsFailed => "Không thể tải danh sách cuộc trò chuyện",
                Text::LoadHistoryFailed => "Không thể tải lịch sử chat",
                Text::CreateSessionFailed => "Không thể tạo cuộc trò chuyện mới",
                Text::SessionCreated => "Đã tạo cuộc trò chuyện mới",
                Text::SendFailed => "Không thể gửi tin nhắn. Vui lòng thử lại",
                Text::DeleteSessionFailed => "Không thể xóa cuộc trò chuyện",
                Text::SessionDeleted => "Đã xóa cuộc trò chuyện",
                Text::DeleteAllFailed => "Không thể xóa lịch sử",
                Text::AllSessionsDeleted => "Đã xóa tất cả lịch sử trò chuyện",
                Text::LoginRequired => "Vui lòng đăng nhập để sử dụng tính năng Chat AI",
                Text::NewSessionLabel => "Mới",
                Text::ConfirmDelete => "Bạn có chắc muốn xóa cuộc trò chuyện này?",
                Text::ConfirmDeleteAll => {
                    "Bạn có chắc muốn xóa TẤT CẢ lịch sử trò chuyện? Hành động này không thể hoàn tác!"
                }
                Text::JustNow => "Vừa xong",
            },
        }
    }

    /// "N minutes ago"
    pub fn minutes_ago(self, n: i64) -> String {
        match self {
            Locale::En => format!("{} min ago", n),
            Locale::Vi => format!("{} phút trước", n),
        }
    }

    /// "N hours ago"
    pub fn hours_ago(self, n: i64) -> String {
        match self {
            Locale::En => format!("{} h ago", n),
            Locale::Vi => format!("{} giờ trước", n),
        }
    }

    /// "N days ago"
    pub fn days_ago(self, n: i64) -> String {
        match self {
            Locale::En => format!("{} d ago", n),
            Locale::Vi => format!("{} ngày trước", n),
        }
    }

    /// Error text for a delete-all where some deletions failed
    pub fn partial_delete_failed(self, failed: usize, total: usize) -> String {
        match self {
            Locale::En => format!("{} of {} conversations could not be deleted", failed, total),
            Locale::Vi => format!("Không thể xóa {}/{} cuộc trò chuyện", failed, total),
        }
    }
}
