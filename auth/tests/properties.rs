//! Property tests for the auth state machine.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use userdesk_auth::mocks::MockAuthGateway;
use userdesk_auth::{
    AuthAction, AuthClient, AuthEnvironment, AuthPhase, AuthReducer, AuthState, LoginCredentials,
    User, auth_store, selectors,
};
use userdesk_core::effect::Effect;
use userdesk_core::reducer::Reducer;
use userdesk_testing::Recorder;

fn user(id: u64) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        gender: "other".to_string(),
        image: String::new(),
        token: format!("token-{id}"),
    }
}

/// Credentials where at least one field is empty.
fn arb_incomplete_credentials() -> impl Strategy<Value = LoginCredentials> {
    prop_oneof![
        "[a-z0-9]{0,12}".prop_map(|username| LoginCredentials::new(username, "")),
        "[a-z0-9]{0,12}".prop_map(|password| LoginCredentials::new("", password)),
    ]
}

fn arb_action() -> impl Strategy<Value = AuthAction> {
    prop_oneof![
        ("[a-z]{1,6}", "[a-z]{1,6}").prop_map(|(u, p)| AuthAction::login(u, p)),
        (0u64..4, 1u64..5).prop_map(|(attempt, id)| AuthAction::LoginSucceeded {
            attempt,
            user: user(id),
        }),
        (0u64..4, "[A-Za-z ]{0,12}")
            .prop_map(|(attempt, error)| AuthAction::LoginFailed { attempt, error }),
        Just(AuthAction::Logout),
    ]
}

/// One step of an interleaved session.
#[derive(Debug, Clone)]
enum Step {
    /// Submit a login with the right (`true`) or wrong password.
    Login(bool),
    Logout,
    /// Deliver one pending outcome, picked by index modulo the pending count.
    Deliver(usize),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<bool>().prop_map(Step::Login),
        Just(Step::Logout),
        any::<usize>().prop_map(Step::Deliver),
    ]
}

/// An outcome produced by a login effect but not yet fed back.
struct Pending {
    id: usize,
    correct: bool,
    outcome: AuthAction,
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn incomplete_credentials_never_transition(credentials in arb_incomplete_credentials()) {
        let gateway = MockAuthGateway::succeeding(user(1));
        let (rejected, states, calls) = runtime().block_on(async move {
            let store = auth_store(AuthEnvironment::new(gateway.clone()));
            let states: Recorder<AuthState> = Recorder::new();
            let _sub = store.subscribe(states.listener()).await;

            let rejected = AuthClient::new(store.clone())
                .submit_login(credentials)
                .await
                .is_err();
            (rejected, states.values(), gateway.calls())
        });

        prop_assert!(rejected);
        prop_assert!(states.is_empty());
        prop_assert_eq!(calls, 0);
    }

    #[test]
    fn every_reachable_state_is_consistent(actions in prop::collection::vec(arb_action(), 0..24)) {
        let reducer = AuthReducer::<MockAuthGateway>::new();
        let env = AuthEnvironment::new(MockAuthGateway::succeeding(user(1)));
        let mut state = AuthState::initial();

        for action in actions {
            let before = state.clone();
            let is_logout = action == AuthAction::Logout;
            let settles = action.attempt().is_some_and(|attempt| before.settles_with(attempt));

            let _effects = reducer.reduce(&mut state, action, &env);

            prop_assert_eq!(selectors::is_authenticated(&state), state.user.is_some());
            if is_logout {
                prop_assert!(state.is_signed_out());
                prop_assert_eq!(state.attempt, before.attempt);
            }
            if settles {
                prop_assert!(!state.loading);
                prop_assert!(matches!(state.phase(), AuthPhase::Authenticated | AuthPhase::Failed));
            }
            // Settled states never carry both flags
            if !state.loading {
                prop_assert!(!(state.user.is_some() && state.error.is_some()));
            }
        }
    }

    #[test]
    fn only_the_current_attempt_settles(steps in prop::collection::vec(arb_step(), 0..32)) {
        let reducer = AuthReducer::<MockAuthGateway>::new();
        let env = AuthEnvironment::new(MockAuthGateway::with_accounts([(
            LoginCredentials::new("alice", "secret"),
            user(1),
        )]));
        let rt = runtime();
        let mut state = AuthState::initial();
        let mut pending: Vec<Pending> = Vec::new();
        let mut in_flight: Option<usize> = None;
        let mut started = 0;

        // Trailing deliveries flush whatever is still pending
        let flush = (0..pending_bound(&steps)).map(|_| Step::Deliver(0));

        for step in steps.into_iter().chain(flush) {
            match step {
                Step::Login(correct) => {
                    let password = if correct { "secret" } else { "wrong" };
                    let effects = reducer.reduce(&mut state, AuthAction::login("alice", password), &env);

                    if in_flight.is_some() {
                        prop_assert!(effects.iter().all(Effect::is_none));
                        continue;
                    }
                    prop_assert!(state.loading);
                    for effect in effects {
                        if let Effect::Future(fut) = effect {
                            let outcome = rt.block_on(fut).unwrap();
                            pending.push(Pending { id: started, correct, outcome });
                        }
                    }
                    in_flight = Some(started);
                    started += 1;
                },
                Step::Logout => {
                    let _effects = reducer.reduce(&mut state, AuthAction::Logout, &env);
                    prop_assert!(state.is_signed_out());
                    in_flight = None;
                },
                Step::Deliver(index) => {
                    if pending.is_empty() {
                        continue;
                    }
                    let Pending { id, correct, outcome } = pending.remove(index % pending.len());
                    let before = state.clone();
                    let _effects = reducer.reduce(&mut state, outcome, &env);

                    if in_flight == Some(id) {
                        in_flight = None;
                        prop_assert!(!state.loading);
                        let expected = if correct { AuthPhase::Authenticated } else { AuthPhase::Failed };
                        prop_assert_eq!(state.phase(), expected);
                    } else {
                        prop_assert_eq!(&state, &before);
                    }
                },
            }
            prop_assert_eq!(state.loading, in_flight.is_some());
        }

        prop_assert!(pending.is_empty());
        prop_assert!(!state.loading);
    }
}

/// Upper bound on the outcomes a run of `steps` can leave pending.
fn pending_bound(steps: &[Step]) -> usize {
    steps.iter().filter(|step| matches!(step, Step::Login(_))).count()
}
