use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use itrm_core::agent::ResearchAgent;
use itrm_core::assistant::{Assistant, DEFAULT_REPLY};
use itrm_core::error::AgentError;
use itrm_core::handlers::ReplySource;
use itrm_core::intent::{IntentTag, RouteStage};
use itrm_core::ledger::Category;
use itrm_core::presentation::{self, FOLLOW_UP_HINT};
use itrm_core::product::ProductAdvisor;
use itrm_core::session::Session;
use rust_decimal::Decimal;

/// Records every query and answers with fixed text.
struct RecordingAgent {
    answer: &'static str,
    queries: Mutex<Vec<String>>,
}

impl RecordingAgent {
    fn new(answer: &'static str) -> Arc<Self> {
        Arc::new(Self {
            answer,
            queries: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ResearchAgent for RecordingAgent {
    async fn ask(&self, query: &str) -> Result<String, AgentError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.answer.to_string())
    }
}

fn agent_backed(agent: Arc<RecordingAgent>) -> Assistant {
    Assistant::with_advisor(ProductAdvisor::with_agent(agent, Duration::from_secs(5)))
}

#[tokio::test]
async fn spend_report_with_defaults() {
    let assistant = Assistant::default();
    let mut session = Session::new("report");
    let turn = assistant
        .respond(&mut session, "What is my current IT spend?")
        .await;
    assert_eq!(turn.intent, IntentTag::ReportSummary);
    assert_eq!(
        turn.reply.text,
        "Total IT Spend: $1,740,000\nIT-to-Revenue Ratio: 1.74%"
    );
}

#[tokio::test]
async fn report_is_idempotent_between_adjustments() {
    let assistant = Assistant::default();
    let mut session = Session::new("idem");
    let first = assistant.respond(&mut session, "summary").await;
    let second = assistant.respond(&mut session, "summary").await;
    assert_eq!(first.reply, second.reply);

    assistant.respond(&mut session, "decrease Personnel").await;
    let third = assistant.respond(&mut session, "summary").await;
    assert_ne!(first.reply, third.reply);
    assert!(third.reply.text.contains("$1,690,000"));
}

#[tokio::test]
async fn increase_hardware() {
    let assistant = Assistant::default();
    let mut session = Session::new("adjust");
    let turn = assistant.respond(&mut session, "increase Hardware").await;
    assert_eq!(turn.intent, IntentTag::AdjustCategoryForecast);
    assert!(turn.reply.text.contains("$352,000"));
    assert_eq!(
        session.ledger.amount(Category::Hardware),
        Decimal::from(352_000)
    );
}

#[tokio::test]
async fn unrecognised_input() {
    let assistant = Assistant::default();
    let mut session = Session::new("miss");
    let turn = assistant.respond(&mut session, "xyz").await;
    assert_eq!(turn.reply.text, DEFAULT_REPLY);
    assert_eq!(turn.reply.source, ReplySource::Default);
}

#[tokio::test]
async fn canned_advice() {
    let assistant = Assistant::default();
    let mut session = Session::new("advice");
    let cases = [
        ("What do you recommend?", IntentTag::RecommendAction),
        ("Where is our exposure?", IntentTag::ShowRiskInsight),
        ("Can we improve margin?", IntentTag::OptimizeMargin),
    ];
    for (utterance, expected) in cases {
        let turn = assistant.respond(&mut session, utterance).await;
        assert_eq!(turn.intent, expected, "{utterance}");
        assert_eq!(turn.reply.source, ReplySource::Canned);
    }
}

#[tokio::test]
async fn primary_match_never_reaches_agent() {
    let agent = RecordingAgent::new("should not be called");
    let assistant = agent_backed(Arc::clone(&agent));
    let mut session = Session::new("shadow");

    // "compare" is a fallback keyword, "risk" a primary one.
    let turn = assistant
        .respond(&mut session, "compare our risk posture")
        .await;
    assert_eq!(turn.intent, IntentTag::ShowRiskInsight);
    assert_eq!(turn.stage, RouteStage::Primary);
    assert!(agent.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn agent_answer_mentioning_both_vendors_gets_table() {
    let agent = RecordingAgent::new(
        "NetApp AFF offers richer data services; Dell PowerStore is simpler to run.",
    );
    let assistant = agent_backed(Arc::clone(&agent));
    let mut session = Session::new("research");

    let utterance = "Is NetApp better than Dell for file storage?";
    let turn = assistant.respond(&mut session, utterance).await;
    assert_eq!(turn.intent, IntentTag::AnalyzeProduct);
    assert_eq!(turn.stage, RouteStage::Fallback);
    assert_eq!(turn.reply.source, ReplySource::Agent);
    assert_eq!(*agent.queries.lock().unwrap(), vec![utterance.to_string()]);

    let rendered = presentation::render(&turn.reply);
    assert!(rendered.text.ends_with(FOLLOW_UP_HINT));
    let table = rendered.side_panel.expect("comparison table");
    assert!(table.contains("NetApp"));
    assert!(table.contains("Dell EMC"));
}

#[tokio::test]
async fn agent_answer_without_both_vendors_is_plain() {
    let agent = RecordingAgent::new("Pure Storage leads this quadrant.");
    let assistant = agent_backed(agent);
    let mut session = Session::new("plain");
    let turn = assistant
        .respond(&mut session, "what are my storage options")
        .await;
    let rendered = presentation::render(&turn.reply);
    assert_eq!(rendered.text, "Pure Storage leads this quadrant.");
    assert!(rendered.side_panel.is_none());
}

#[tokio::test]
async fn adjustment_prompt_mentioning_spend_adjusts() {
    let assistant = Assistant::default();
    let mut session = Session::new("spend-word");
    let turn = assistant
        .respond(&mut session, "increase Hardware spend")
        .await;
    assert_eq!(turn.intent, IntentTag::AdjustCategoryForecast);
    assert_eq!(
        turn.reply.text,
        "Increased Hardware budget by 10%. New value: $352,000"
    );
    assert_eq!(
        session.ledger.amount(Category::Hardware),
        Decimal::from(352_000)
    );
}

#[tokio::test]
async fn repeated_increases_stop_with_a_reply() {
    let assistant = Assistant::default();
    let mut session = Session::new("runaway");

    let mut rejected = None;
    for turn_no in 0..1000 {
        let turn = assistant.respond(&mut session, "increase Hardware").await;
        if turn.reply.text.starts_with("Couldn't adjust Hardware budget") {
            rejected = Some(turn_no);
            break;
        }
    }
    assert!(rejected.is_some(), "amount never hit the representable limit");

    let capped = session.ledger.amount(Category::Hardware);
    let again = assistant.respond(&mut session, "increase Hardware").await;
    assert!(again.reply.text.starts_with("Couldn't adjust Hardware budget"));
    assert_eq!(session.ledger.amount(Category::Hardware), capped);

    // The session is still usable afterwards.
    let down = assistant.respond(&mut session, "decrease Hardware").await;
    assert!(down.reply.text.starts_with("Decreased Hardware budget by 10%."));
}
