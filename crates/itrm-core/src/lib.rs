//! itrm-core: core library for the itrm IT budget assistant.
//!
//! A free-text prompt about the IT budget is routed to one handler by a
//! keyword table, and the handler answers from an in-memory ledger, from
//! fixed advice, or (for product comparisons) from a web-search-backed
//! LLM agent.
//!
//! - [`intent`]: Ordered keyword router plus the product fallback pass
//! - [`assistant`]: Per-turn dispatcher
//! - [`handlers`]: One [`ActionHandler`](handlers::ActionHandler) per intent
//! - [`ledger`]: Session-owned budget amounts and currency formatting
//! - [`product`]: Static catalog or research agent for product questions
//! - [`agent`]: Tool-calling research loop
//! - [`provider`]: LLM provider trait and OpenAI-compatible implementation
//! - [`tools`]: Tool trait, registry, and the `web_search` tool
//! - [`presentation`]: Reply augmentation applied by the shell
//! - [`session`]: Session table, one ledger per session
//! - [`config`]: JSON configuration with environment overrides
//!
//! # Quick Start
//!
//! ```no_run
//! use itrm_core::assistant::Assistant;
//! use itrm_core::config::Config;
//! use itrm_core::presentation;
//! use itrm_core::session::Session;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let assistant = Assistant::from_config(&config, reqwest::Client::new())
//!     .map_err(|errs| anyhow::anyhow!("{} configuration error(s)", errs.len()))?;
//!
//! let mut session = Session::new("default");
//! let turn = assistant.respond(&mut session, "What is my current IT spend?").await;
//! println!("{}", presentation::render(&turn.reply).text);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod assistant;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod ledger;
pub mod presentation;
pub mod product;
pub mod provider;
pub mod session;
pub mod tools;
