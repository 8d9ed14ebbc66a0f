use super::*;

#[test]
fn toast_state_default_is_empty() {
    assert!(ToastState::default().toasts.is_empty());
}

#[test]
fn push_appends_with_kind() {
    let mut state = ToastState::default();
    state.push_success("Login successful");
    state.push_error("Login failed");

    let kinds: Vec<_> = state.toasts.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error]);
    assert_eq!(state.toasts[1].message, "Login failed");
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let first = state.push_success("a");
    let second = state.push_success("b");

    state.dismiss(first);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].id, second);

    state.dismiss(first);
    assert_eq!(state.toasts.len(), 1);
}

#[test]
fn push_caps_visible_toasts() {
    let mut state = ToastState::default();
    for i in 0..(MAX_TOASTS + 2) {
        state.push_error(format!("e{i}"));
    }
    assert_eq!(state.toasts.len(), MAX_TOASTS);
    assert_eq!(state.toasts[0].message, "e2");
}

#[test]
fn css_class_reflects_kind() {
    assert_eq!(ToastKind::Success.css_class(), "toast toast--success");
    assert_eq!(ToastKind::Error.css_class(), "toast toast--error");
}
