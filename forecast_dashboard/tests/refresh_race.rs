mod common;

use std::{sync::Arc, time::Duration};

use common::FakeService;
use forecast_client::models::{
    horizon::{HistoryPeriod, PredictionDays},
    prediction::PredictionRequest,
};
use forecast_dashboard::{dashboard::Dashboard, view_state::PublishOutcome};

fn request(symbol: &str) -> PredictionRequest {
    PredictionRequest::new(symbol, HistoryPeriod::OneYear, PredictionDays::new(7).unwrap())
}

#[tokio::test(start_paused = true)]
async fn slow_earlier_fetch_cannot_overwrite_later_one() {
    let service = Arc::new(
        FakeService::new()
            .with_delay("SLOW", Duration::from_millis(500))
            .with_delay("FAST", Duration::from_millis(20)),
    );
    let dashboard = Dashboard::new(service.clone(), service);

    // SLOW is polled first, so it takes the earlier generation.
    let (slow, fast) = tokio::join!(dashboard.refresh(request("SLOW")), dashboard.refresh(request("FAST")));
    let slow = slow.unwrap();
    let fast = fast.unwrap();

    assert!(slow.state.generation < fast.state.generation);
    assert_eq!(fast.outcome, PublishOutcome::Applied);
    assert_eq!(
        slow.outcome,
        PublishOutcome::Superseded {
            current: fast.state.generation
        }
    );

    let view = dashboard.view().unwrap();
    assert_eq!(view.request.symbol, "FAST");
    assert_eq!(view.generation, fast.state.generation);
}

#[tokio::test(start_paused = true)]
async fn later_fetch_wins_when_responses_arrive_in_order() {
    let service = Arc::new(
        FakeService::new()
            .with_delay("FIRST", Duration::from_millis(10))
            .with_delay("SECOND", Duration::from_millis(300)),
    );
    let dashboard = Dashboard::new(service.clone(), service);

    let (first, second) = tokio::join!(dashboard.refresh(request("FIRST")), dashboard.refresh(request("SECOND")));

    assert_eq!(first.unwrap().outcome, PublishOutcome::Applied);
    assert_eq!(second.unwrap().outcome, PublishOutcome::Applied);
    assert_eq!(dashboard.view().unwrap().request.symbol, "SECOND");
}

#[tokio::test(start_paused = true)]
async fn failed_later_fetch_does_not_block_earlier_success() {
    let service = Arc::new(
        FakeService::new()
            .with_delay("GOOD", Duration::from_millis(200))
            .failing("BAD"),
    );
    let dashboard = Dashboard::new(service.clone(), service);

    let (good, bad) = tokio::join!(dashboard.refresh(request("GOOD")), dashboard.refresh(request("BAD")));

    assert!(bad.is_err());
    assert_eq!(good.unwrap().outcome, PublishOutcome::Applied);
    assert_eq!(dashboard.view().unwrap().request.symbol, "GOOD");
}
