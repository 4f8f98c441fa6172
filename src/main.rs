//! EventHub participation client
//!
//! Main application entry point
//!
//! ```text
//! eventhub <event-id> [--favorite] [--join [--payment-method <pm_id>]] [--review <rating> <comment>]
//! ```
//!
//! The session is read from `EVENTHUB_SESSION_TOKEN` and the viewer from
//! `EVENTHUB_VIEWER_ID` / `EVENTHUB_VIEWER_NAME`.

use anyhow::{bail, Context};
use tracing::{error, info, warn};

use EventHub::{
    config::Settings,
    models::user::{Session, UserRole, Viewer},
    utils::logging,
    AppContext, EventHubError, EventView, JoinPhase,
};

#[derive(Debug, Default)]
struct Args {
    event_id: String,
    favorite: bool,
    join: bool,
    payment_method: Option<String>,
    review: Option<(u8, String)>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--favorite" => args.favorite = true,
            "--join" => args.join = true,
            "--payment-method" => {
                args.payment_method = Some(iter.next().context("--payment-method needs a value")?);
            }
            "--review" => {
                let rating = iter
                    .next()
                    .context("--review needs a rating")?
                    .parse::<u8>()
                    .context("rating must be a number")?;
                let comment = iter.next().context("--review needs a comment")?;
                args.review = Some((rating, comment));
            }
            other if other.starts_with("--") => bail!("unknown option: {}", other),
            other if args.event_id.is_empty() => args.event_id = other.to_string(),
            other => bail!("unexpected argument: {}", other),
        }
    }

    if args.event_id.is_empty() {
        bail!("usage: eventhub <event-id> [--favorite] [--join [--payment-method <pm_id>]] [--review <rating> <comment>]");
    }
    Ok(args)
}

fn viewer_from_env() -> (Option<Session>, Option<Viewer>) {
    let session = std::env::var("EVENTHUB_SESSION_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
        .map(Session::new);

    let viewer = match (&session, std::env::var("EVENTHUB_VIEWER_ID")) {
        (Some(_), Ok(id)) if !id.trim().is_empty() => {
            let name = std::env::var("EVENTHUB_VIEWER_NAME").unwrap_or_default();
            Some(Viewer::new(id, name, UserRole::User))
        }
        _ => None,
    };

    (session, viewer)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file appender on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", EventHub::info());

    let args = parse_args()?;
    let (session, viewer) = viewer_from_env();
    if viewer.is_none() {
        info!("No signed-in viewer, running read-only");
    }

    let context = AppContext::from_settings(settings, session.as_ref(), viewer)?;
    info!(context = ?context.viewer.summary(), "Viewer context ready");

    let mut view = EventView::load(context, &args.event_id).await?;
    let verdict = view.verdict();

    println!("{}", view.summary());
    println!("Join: {} ({})", verdict.reason.message(), verdict.reason);
    if let Some(host) = view.event().host_name() {
        println!("Hosted by {} ({} reviews)", host, view.host_reviews().len());
    }

    if args.favorite {
        match view.toggle_favorite().await {
            Ok(true) => println!("Saved to favorites"),
            Ok(false) => println!("Removed from favorites"),
            Err(e) => println!("Could not update favorites: {}", e),
        }
    }

    if args.join {
        let mut flow = view.begin_join()?;
        let mut phases = flow.subscribe();
        tokio::spawn(async move {
            while phases.changed().await.is_ok() {
                let phase = *phases.borrow_and_update();
                info!(phase = %phase, "Join flow phase");
            }
        });

        let outcome = match flow.confirm().await {
            Ok(JoinPhase::PaymentConfirming) => {
                let amount = flow.payment_intent().map(|i| i.amount).unwrap_or_default();
                println!("Paying {}", EventHub::utils::helpers::format_fee(amount));
                match args.payment_method.as_deref() {
                    Some(method) => flow.submit_payment(method).await,
                    None => {
                        flow.dismiss();
                        Err(EventHubError::InvalidInput("A --payment-method is required for paid events".to_string()))
                    }
                }
            }
            other => other,
        };

        match outcome {
            Ok(_) if flow.is_joined() => {
                view.apply_join(&flow).await;
                println!("You're in! {}", view.summary());
            }
            Ok(phase) => warn!(phase = %phase, "Join flow stopped early"),
            Err(EventHubError::Join(failure)) => println!("{}", failure.user_message()),
            Err(e) => {
                error!(error = %e, "Join flow failed");
                return Err(e.into());
            }
        }
    }

    if let Some((rating, comment)) = args.review {
        if view.review_control_visible() {
            view.submit_review(rating, &comment).await?;
            println!("Thanks for your review");
        } else {
            println!("Reviews are open to participants who have not reviewed yet ({:?})", view.review_eligibility());
        }
    }

    Ok(())
}
