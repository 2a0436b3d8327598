use market::PairKey;

/// Fields collected by a finished onboarding dialogue.
///
/// Nothing is validated: a bad address shows up later as fetch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDraft {
    pub address: String,
    pub chain: String,
    pub name: String,
}

impl TokenDraft {
    pub fn key(&self) -> PairKey {
        PairKey::new(self.chain.clone(), self.address.clone())
    }
}

/// Per-chat dialogue state. Fields accumulate in the variants themselves,
/// so a state can only carry what has actually been entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingState {
    Idle,
    AwaitingAddress,
    AwaitingChain { address: String },
    AwaitingName { address: String, chain: String },
    Complete(TokenDraft),
    Cancelled,
}

/// What the user should be asked next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Address,
    Chain,
    Name,
}

/// Effect of one transition, for the caller to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Prompt(Prompt),
    Completed(TokenDraft),
    Cancelled,
    /// Input arrived in a state that does not consume text.
    Ignored,
}

impl OnboardingState {
    /// Idle → AwaitingAddress.
    pub fn start() -> (Self, Step) {
        (OnboardingState::AwaitingAddress, Step::Prompt(Prompt::Address))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OnboardingState::Complete(_) | OnboardingState::Cancelled)
    }

    /// Feeds one text message into the machine.
    ///
    /// Text equal to `cancel_label` cancels from every non-terminal state.
    pub fn on_input(self, text: &str, cancel_label: &str) -> (Self, Step) {
        if text == cancel_label && !self.is_terminal() {
            return (OnboardingState::Cancelled, Step::Cancelled);
        }

        match self {
            OnboardingState::AwaitingAddress => (
                OnboardingState::AwaitingChain {
                    address: text.to_string(),
                },
                Step::Prompt(Prompt::Chain),
            ),
            OnboardingState::AwaitingChain { address } => (
                OnboardingState::AwaitingName {
                    address,
                    chain: text.to_string(),
                },
                Step::Prompt(Prompt::Name),
            ),
            OnboardingState::AwaitingName { address, chain } => {
                let draft = TokenDraft {
                    address,
                    chain,
                    name: text.to_string(),
                };
                (
                    OnboardingState::Complete(draft.clone()),
                    Step::Completed(draft),
                )
            }
            other => (other, Step::Ignored),
        }
    }
}
