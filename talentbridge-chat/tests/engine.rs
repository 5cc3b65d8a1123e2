mod common;

use common::{harness, harness_with_confirm, recruiter, MockChatApi};
use std::sync::Arc;
use talentbridge_chat::{Decline, Intent};
use talentbridge_core::chat::Role;
use talentbridge_core::notify::NotificationLevel;
use talentbridge_core::Error;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_open_selects_first_session_and_loads_history() {
    let mut h = harness(MockChatApi::new().with_session("s1", Some("Hi")));

    assert_ok!(h.runtime.dispatch(Intent::Open { user: Some(recruiter()) }));
    h.runtime.run_until_idle().await;

    let state = h.runtime.state();
    assert_eq!(state.active_session(), Some("s1"));
    assert_eq!(state.messages().len(), 2);
    assert!(!state.is_busy());
    assert_eq!(h.api.calls(), vec!["list", "history:s1"]);
}

#[tokio::test]
async fn test_send_appends_user_then_assistant_and_refreshes() {
    let mut h = harness(MockChatApi::new().with_session("s1", Some("Hi")));
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    h.runtime
        .dispatch(Intent::SetInput("What jobs are open?".into()))
        .unwrap();
    assert_ok!(h.runtime.dispatch(Intent::Submit));

    // The provisional message shows before the reply arrives.
    assert_eq!(h.runtime.state().messages().len(), 3);
    assert!(h.runtime.state().send().is_sending());
    assert_eq!(h.runtime.state().input(), "");

    h.runtime.run_until_idle().await;

    let log = h.runtime.state().messages().messages();
    assert_eq!(log.len(), 4);
    assert_eq!(log[2].role, Role::User);
    assert_eq!(log[2].content, "What jobs are open?");
    assert!(log[2].id.is_local());
    assert_eq!(log[3].role, Role::Assistant);
    assert_eq!(log[3].content, "Reply to: What jobs are open?");
    assert_eq!(h.api.count_calls("list"), 2);
    assert!(h.sink.entries().is_empty());
}

#[tokio::test]
async fn test_n_sends_add_2n_messages_in_order() {
    let mut h = harness(MockChatApi::new().with_session("s1", None));
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    let questions = ["first", "second", "third", "fourth"];
    for question in questions {
        h.runtime.dispatch(Intent::SetInput(question.into())).unwrap();
        h.runtime.dispatch(Intent::Submit).unwrap();
        h.runtime.run_until_idle().await;
    }

    let log = h.runtime.state().messages().messages();
    assert_eq!(log.len(), 2 * questions.len());
    for (pair, question) in log.chunks(2).zip(questions) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[0].content, question);
        assert_eq!(pair[1].role, Role::Assistant);
        assert_eq!(pair[1].content, format!("Reply to: {}", question));
    }
}

#[tokio::test]
async fn test_second_submit_while_sending_is_rejected() {
    let mut h = harness(MockChatApi::new().with_session("s1", None));
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    h.runtime.dispatch(Intent::SetInput("one".into())).unwrap();
    h.runtime.dispatch(Intent::Submit).unwrap();
    h.runtime.dispatch(Intent::SetInput("two".into())).unwrap();
    let err = assert_err!(h.runtime.dispatch(Intent::Submit));
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(h.runtime.state().input(), "two");

    h.runtime.run_until_idle().await;
    assert_eq!(h.api.count_calls("send"), 1);
    assert_eq!(h.runtime.state().messages().len(), 2);
}

#[tokio::test]
async fn test_failed_send_rolls_back() {
    let api = MockChatApi::new().with_session("s1", None);
    api.fail_next_sends(1);
    let mut h = harness(api);
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    h.runtime.dispatch(Intent::SetInput("Hello".into())).unwrap();
    h.runtime.dispatch(Intent::Submit).unwrap();
    assert_eq!(h.runtime.state().messages().len(), 1);

    h.runtime.run_until_idle().await;

    assert_eq!(h.runtime.state().messages().len(), 0);
    assert_eq!(h.runtime.state().input(), "");
    assert!(!h.runtime.state().send().is_sending());
    let errors = h.sink.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Could not send the message. Please try again");
}

#[tokio::test]
async fn test_open_without_permission_is_refused() {
    let mut h = harness(MockChatApi::new().with_session("s1", None));

    let err = assert_err!(h.runtime.dispatch(Intent::Open { user: None }));
    assert!(matches!(err, Error::PermissionDenied(_)));
    assert!(h.runtime.is_idle());
    assert!(h.api.calls().is_empty());
    assert_eq!(h.sink.errors().len(), 1);
}

#[tokio::test]
async fn test_refresh_failure_keeps_previous_list() {
    let mut h = harness(
        MockChatApi::new()
            .with_session("s1", Some("Hi"))
            .with_session("s2", None),
    );
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    h.api.fail_next_lists(1);
    h.runtime.dispatch(Intent::Refresh).unwrap();
    h.runtime.run_until_idle().await;

    assert_eq!(h.runtime.state().directory().session_ids(), vec!["s1", "s2"]);
    assert_eq!(h.runtime.state().active_session(), Some("s1"));
    assert_eq!(h.sink.errors().len(), 1);
}

#[tokio::test]
async fn test_history_failure_clears_log() {
    let mut h = harness(MockChatApi::new().with_session("s1", Some("Hi")));
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;
    assert_eq!(h.runtime.state().messages().len(), 2);

    // Unknown to the backend, so the history call fails.
    h.runtime.dispatch(Intent::Select("ghost".into())).unwrap();
    h.runtime.run_until_idle().await;

    assert!(h.runtime.state().messages().is_empty());
    let errors = h.sink.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Session not found");
}

#[tokio::test]
async fn test_create_surfaces_and_selects_new_session() {
    let mut h = harness(MockChatApi::new().with_session("s1", Some("Hi")));
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    h.runtime.dispatch(Intent::Create).unwrap();
    h.runtime.dispatch(Intent::Create).unwrap();
    h.runtime.run_until_idle().await;

    let state = h.runtime.state();
    assert_eq!(h.api.count_calls("create"), 1);
    assert_eq!(state.directory().session_ids(), vec!["new-1", "s1"]);
    assert_eq!(state.active_session(), Some("new-1"));
    assert!(state.messages().is_empty());
    assert!(!state.lifecycle().is_creating());

    let entries = h.sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, NotificationLevel::Success);
}

#[tokio::test]
async fn test_create_failure_leaves_selection() {
    let api = MockChatApi::new().with_session("s1", Some("Hi"));
    api.fail_next_creates(1);
    let mut h = harness(api);
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    h.runtime.dispatch(Intent::Create).unwrap();
    h.runtime.run_until_idle().await;

    assert_eq!(h.runtime.state().active_session(), Some("s1"));
    assert_eq!(h.runtime.state().directory().len(), 1);
    let errors = h.sink.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Quota exceeded");
}

#[tokio::test]
async fn test_delete_active_session() {
    let mut h = harness(
        MockChatApi::new()
            .with_session("s1", Some("Hi"))
            .with_session("s2", Some("Salary range?")),
    );
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    h.runtime.dispatch(Intent::Delete("s1".into())).unwrap();
    h.runtime.run_until_idle().await;

    let state = h.runtime.state();
    assert_eq!(state.directory().session_ids(), vec!["s2"]);
    assert!(state.active_session().is_none());
    assert!(state.messages().is_empty());
    assert_eq!(h.sink.entries()[0].message, "Conversation deleted");
}

#[tokio::test]
async fn test_declined_delete_never_reaches_backend() {
    let mut h = harness_with_confirm(
        MockChatApi::new().with_session("s1", Some("Hi")),
        Arc::new(Decline),
    );
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;

    assert_ok!(h.runtime.dispatch(Intent::Delete("s1".into())));
    assert_ok!(h.runtime.dispatch(Intent::DeleteAll));
    h.runtime.run_until_idle().await;

    assert_eq!(h.api.count_calls("clear"), 0);
    assert_eq!(h.runtime.state().active_session(), Some("s1"));
}

#[tokio::test]
async fn test_delete_all_with_partial_failure() {
    let api = MockChatApi::new()
        .with_session("s1", Some("Hi"))
        .with_session("s2", Some("Remote roles?"))
        .with_session("s3", None)
        .with_session("s4", None);
    api.fail_clear("s3");
    let mut h = harness(api);
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;
    h.runtime.dispatch(Intent::ToggleSettings).unwrap();

    h.runtime.dispatch(Intent::DeleteAll).unwrap();
    h.runtime.run_until_idle().await;

    assert_eq!(h.api.count_calls("clear"), 4);
    let state = h.runtime.state();
    assert_eq!(state.directory().session_ids(), vec!["s3"]);
    assert!(state.active_session().is_none());
    assert!(state.messages().is_empty());
    assert!(state.widget().settings_open);

    let errors = h.sink.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "1 of 4 conversations could not be deleted");
}

#[tokio::test]
async fn test_delete_all_success_closes_settings() {
    let mut h = harness(
        MockChatApi::new()
            .with_session("s1", Some("Hi"))
            .with_session("s2", None),
    );
    h.runtime
        .dispatch(Intent::Open { user: Some(recruiter()) })
        .unwrap();
    h.runtime.run_until_idle().await;
    h.runtime.dispatch(Intent::ToggleSettings).unwrap();

    h.runtime.dispatch(Intent::DeleteAll).unwrap();
    h.runtime.run_until_idle().await;

    let state = h.runtime.state();
    assert!(state.directory().is_empty());
    assert!(!state.widget().settings_open);
    assert!(!state.can_delete_all());
    assert_eq!(h.sink.entries().len(), 1);
    assert_eq!(h.sink.entries()[0].message, "All chat history deleted");

    let err = assert_err!(h.runtime.dispatch(Intent::DeleteAll));
    assert!(err.is_rejection());
}
