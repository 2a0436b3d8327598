use session::onboarding::{OnboardingManager, OnboardingState, Prompt, Step, TokenDraft};

const CANCEL: &str = "Отмена";

#[test]
fn full_dialogue_produces_draft_and_ends_session() {
    let mgr = OnboardingManager::new(CANCEL);

    assert_eq!(mgr.begin(1), Step::Prompt(Prompt::Address));
    assert_eq!(mgr.handle_input(1, "0xABC"), Some(Step::Prompt(Prompt::Chain)));
    assert_eq!(mgr.handle_input(1, "bsc"), Some(Step::Prompt(Prompt::Name)));

    let step = mgr.handle_input(1, "Foo");
    assert_eq!(
        step,
        Some(Step::Completed(TokenDraft {
            address: "0xABC".into(),
            chain: "bsc".into(),
            name: "Foo".into(),
        }))
    );
    assert!(!mgr.is_active(1));
}

#[test]
fn input_without_session_is_not_consumed() {
    let mgr = OnboardingManager::new(CANCEL);
    assert_eq!(mgr.handle_input(5, "hello"), None);
}

#[test]
fn cancelled_fields_do_not_leak_into_next_dialogue() {
    let mgr = OnboardingManager::new(CANCEL);

    mgr.begin(1);
    mgr.handle_input(1, "0xOLD");
    mgr.handle_input(1, "eth");
    assert_eq!(mgr.handle_input(1, CANCEL), Some(Step::Cancelled));
    assert!(!mgr.is_active(1));

    mgr.begin(1);
    assert_eq!(mgr.state(1), Some(OnboardingState::AwaitingAddress));
    mgr.handle_input(1, "0xNEW");
    assert_eq!(
        mgr.state(1),
        Some(OnboardingState::AwaitingChain {
            address: "0xNEW".into()
        })
    );
}

#[test]
fn cancel_label_without_dialogue_is_not_consumed() {
    let mgr = OnboardingManager::new(CANCEL);

    assert_eq!(mgr.handle_input(3, CANCEL), None);
    mgr.begin(3);
    assert_eq!(mgr.handle_input(3, CANCEL), Some(Step::Cancelled));
    assert!(!mgr.is_active(3));
}

#[test]
fn restarting_discards_partial_input() {
    let mgr = OnboardingManager::new(CANCEL);

    mgr.begin(1);
    mgr.handle_input(1, "0xPARTIAL");
    mgr.begin(1);

    assert_eq!(mgr.state(1), Some(OnboardingState::AwaitingAddress));
}

#[test]
fn chats_do_not_share_dialogues() {
    let mgr = OnboardingManager::new(CANCEL);

    mgr.begin(1);
    mgr.begin(2);
    mgr.handle_input(1, "0xONE");
    mgr.handle_input(2, CANCEL);

    assert_eq!(
        mgr.state(1),
        Some(OnboardingState::AwaitingChain {
            address: "0xONE".into()
        })
    );
    assert_eq!(mgr.state(2), None);
}
