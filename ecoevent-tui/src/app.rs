use std::sync::Arc;

use chrono::{DateTime, Utc};
use ecoevent_core::{
    guide::{GuideFilter, filter_guidelines},
    messaging::MessageCenter,
    model::{Agency, Attendee, AttendeeId, Bin, DisposalGuideline, EventId},
    rewards::{LevelTable, Reward, redeem, standard_catalog},
    service::EcoEventService,
    telemetry,
};
use tracing::{info, warn};

use crate::alerts::AlertCenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Bins,
    Guide,
    Rewards,
    Agencies,
}

impl Tab {
    pub(crate) const ALL: [Tab; 4] = [Tab::Bins, Tab::Guide, Tab::Rewards, Tab::Agencies];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Bins => "Smart Bins",
            Tab::Guide => "Recycling Guide",
            Tab::Rewards => "Rewards",
            Tab::Agencies => "Agencies",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tab::Bins => 0,
            Tab::Guide => 1,
            Tab::Rewards => 2,
            Tab::Agencies => 3,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Tab::Bins => Tab::Guide,
            Tab::Guide => Tab::Rewards,
            Tab::Rewards => Tab::Agencies,
            Tab::Agencies => Tab::Bins,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Tab::Bins => Tab::Agencies,
            Tab::Guide => Tab::Bins,
            Tab::Rewards => Tab::Guide,
            Tab::Agencies => Tab::Rewards,
        }
    }

    /// Tabs where printable keys go into a text field.
    pub(crate) fn takes_text(self) -> bool {
        matches!(self, Tab::Guide | Tab::Agencies)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinDetailTab {
    Status,
    Maintenance,
    Analytics,
}

impl BinDetailTab {
    pub(crate) const ALL: [BinDetailTab; 3] = [
        BinDetailTab::Status,
        BinDetailTab::Maintenance,
        BinDetailTab::Analytics,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            BinDetailTab::Status => "Status",
            BinDetailTab::Maintenance => "Maintenance",
            BinDetailTab::Analytics => "Analytics",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            BinDetailTab::Status => 0,
            BinDetailTab::Maintenance => 1,
            BinDetailTab::Analytics => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            BinDetailTab::Status => BinDetailTab::Maintenance,
            BinDetailTab::Maintenance => BinDetailTab::Analytics,
            BinDetailTab::Analytics => BinDetailTab::Status,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            BinDetailTab::Status => BinDetailTab::Analytics,
            BinDetailTab::Maintenance => BinDetailTab::Status,
            BinDetailTab::Analytics => BinDetailTab::Maintenance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RewardTab {
    Rewards,
    History,
    Achievements,
}

impl RewardTab {
    pub(crate) const ALL: [RewardTab; 3] = [
        RewardTab::Rewards,
        RewardTab::History,
        RewardTab::Achievements,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            RewardTab::Rewards => "Rewards",
            RewardTab::History => "History",
            RewardTab::Achievements => "Achievements",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            RewardTab::Rewards => 0,
            RewardTab::History => 1,
            RewardTab::Achievements => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            RewardTab::Rewards => RewardTab::History,
            RewardTab::History => RewardTab::Achievements,
            RewardTab::Achievements => RewardTab::Rewards,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            RewardTab::Rewards => RewardTab::Achievements,
            RewardTab::History => RewardTab::Rewards,
            RewardTab::Achievements => RewardTab::History,
        }
    }
}

pub(crate) struct App {
    pub service: Arc<EcoEventService>,
    pub event: EventId,
    pub event_name: String,
    pub attendee_id: AttendeeId,
    pub now: DateTime<Utc>,

    pub tab: Tab,

    pub bins: Vec<Bin>,
    pub bin_index: usize,
    pub show_bin_details: bool,
    pub bin_detail: BinDetailTab,

    pub guidelines: Vec<DisposalGuideline>,
    pub guide_query: String,
    pub guide_filter: GuideFilter,
    pub guide_index: usize,
    pub open_guideline: Option<DisposalGuideline>,

    pub attendee: Option<Attendee>,
    pub levels: LevelTable,
    pub rewards: Vec<Reward>,
    pub reward_tab: RewardTab,
    pub reward_index: usize,

    pub agencies: Vec<Agency>,
    pub agency_index: usize,
    pub message_input: String,
    pub messages: MessageCenter,

    pub alerts: AlertCenter,

    pub is_loading: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl App {
    pub(crate) fn new(
        service: Arc<EcoEventService>,
        event: EventId,
        attendee_id: AttendeeId,
        alerts: AlertCenter,
    ) -> Self {
        let event_name = service
            .events()
            .into_iter()
            .find(|meta| meta.id == event)
            .map_or_else(|| event.to_string(), |meta| meta.name);
        Self {
            service,
            event,
            event_name,
            attendee_id,
            now: Utc::now(),
            tab: Tab::Bins,
            bins: Vec::new(),
            bin_index: 0,
            show_bin_details: false,
            bin_detail: BinDetailTab::Status,
            guidelines: Vec::new(),
            guide_query: String::new(),
            guide_filter: GuideFilter::All,
            guide_index: 0,
            open_guideline: None,
            attendee: None,
            levels: LevelTable::standard(),
            rewards: standard_catalog(),
            reward_tab: RewardTab::Rewards,
            reward_index: 0,
            agencies: Vec::new(),
            agency_index: 0,
            message_input: String::new(),
            messages: MessageCenter::new(),
            alerts,
            is_loading: false,
            error_message: None,
            info_message: None,
        }
    }

    /// Reload every data set from the provider.
    ///
    /// Each data set loads on its own, so a missing attendee profile does not
    /// keep bins, alerts, or agencies from updating. Failures end up in
    /// `error_message`.
    pub(crate) async fn refresh(&mut self) {
        let service = Arc::clone(&self.service);
        let mut failures = Vec::new();

        match service.bins(&self.event).await {
            Ok(bins) => {
                self.bins = bins;
                self.observe_bins();
            }
            Err(err) => failures.push(format!("bins ({err})")),
        }
        match service.guidelines(&self.event).await {
            Ok(guidelines) => self.guidelines = guidelines,
            Err(err) => failures.push(format!("guidelines ({err})")),
        }
        match service.attendee(&self.event, &self.attendee_id).await {
            Ok(attendee) => self.attendee = Some(attendee),
            Err(err) => {
                self.attendee = None;
                failures.push(format!("attendee ({err})"));
            }
        }
        match service.agencies(&self.event).await {
            Ok(agencies) => self.agencies = agencies,
            Err(err) => failures.push(format!("agencies ({err})")),
        }

        self.bin_index = self.bin_index.min(self.bins.len().saturating_sub(1));
        self.agency_index = self.agency_index.min(self.agencies.len().saturating_sub(1));
        self.clamp_guide_index();

        if failures.is_empty() {
            self.error_message = None;
            info!(bins = self.bins.len(), "dashboard refreshed");
        } else {
            let summary = failures.join(", ");
            warn!(failures = %summary, "dashboard partially refreshed");
            self.error_message = Some(format!("Failed to load {summary}"));
        }
    }

    /// Advance the clock and drop alerts whose timers expired.
    pub(crate) fn tick(&mut self, now: DateTime<Utc>) {
        self.now = now;
        self.alerts.drain_expired();
    }

    fn observe_bins(&mut self) {
        for bin in &self.bins {
            match telemetry::needs_near_full_alert(bin) {
                Ok(near_full) => self.alerts.observe(&bin.id, &bin.location, near_full),
                Err(err) => warn!(bin = %bin.id, error = %err, "skipping alert check"),
            }
        }
    }

    pub(crate) fn selected_bin(&self) -> Option<&Bin> {
        self.bins.get(self.bin_index)
    }

    pub(crate) fn visible_guidelines(&self) -> Vec<&DisposalGuideline> {
        filter_guidelines(&self.guidelines, &self.guide_query, self.guide_filter)
    }

    pub(crate) fn clamp_guide_index(&mut self) {
        let visible = self.visible_guidelines().len();
        self.guide_index = self.guide_index.min(visible.saturating_sub(1));
    }

    pub(crate) fn open_selected_guideline(&mut self) {
        let selected = self
            .visible_guidelines()
            .get(self.guide_index)
            .map(|&guideline| guideline.clone());
        self.open_guideline = selected;
    }

    pub(crate) fn selected_agency(&self) -> Option<&Agency> {
        self.agencies.get(self.agency_index)
    }

    /// Confirm eligibility for the selected reward. Points are not debited.
    pub(crate) fn redeem_selected(&mut self) {
        let Some(attendee) = &self.attendee else {
            self.error_message = Some("No attendee loaded".into());
            return;
        };
        let Some(reward) = self.rewards.get(self.reward_index) else {
            return;
        };
        match redeem(reward, attendee) {
            Ok(request) => {
                info!(attendee = %request.attendee, reward = %request.reward, "redemption requested");
                self.error_message = None;
                self.info_message = Some(format!(
                    "Show this screen at the info desk to collect: {}",
                    request.reward
                ));
            }
            Err(err) => {
                self.info_message = None;
                self.error_message = Some(format!("Cannot redeem: {err}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ecoevent_core::plugin::PluginRegistry;
    use ecoevent_provider_demo as demo;

    use super::*;

    fn app() -> App {
        let registry = PluginRegistry::new(vec![demo::plugin(Utc::now())]);
        App::new(
            Arc::new(EcoEventService::new(Arc::new(registry))),
            EventId(String::from(demo::EVENT_ID)),
            AttendeeId(String::from("1")),
            AlertCenter::new(Duration::from_secs(5)),
        )
    }

    #[test]
    fn tabs_cycle_both_ways() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().previous(), tab);
        }
        for tab in BinDetailTab::ALL {
            assert_eq!(tab.previous().next(), tab);
        }
        for tab in RewardTab::ALL {
            assert_eq!(tab.next().previous(), tab);
        }
        assert!(Tab::Guide.takes_text());
        assert!(!Tab::Bins.takes_text());
    }

    #[tokio::test]
    async fn refresh_loads_demo_event_and_raises_alert() {
        let mut app = app();
        assert_eq!(app.event_name, "Eco-Event Expo");
        app.refresh().await;
        assert_eq!(app.bins.len(), 4);
        assert_eq!(app.guidelines.len(), 6);
        assert_eq!(app.agencies.len(), 2);
        assert_eq!(app.attendee.as_ref().unwrap().points, 150);

        let alerted: Vec<&str> = app
            .alerts
            .active()
            .iter()
            .map(|alert| alert.location.as_str())
            .collect();
        assert_eq!(alerted, vec!["Main Stage"]);
        assert!(app.error_message.is_none());
    }

    #[tokio::test]
    async fn unknown_attendee_keeps_bins_alerts_and_agencies() {
        let registry = PluginRegistry::new(vec![demo::plugin(Utc::now())]);
        let mut app = App::new(
            Arc::new(EcoEventService::new(Arc::new(registry))),
            EventId(String::from(demo::EVENT_ID)),
            AttendeeId(String::from("404")),
            AlertCenter::new(Duration::from_secs(5)),
        );
        app.refresh().await;

        assert!(app.attendee.is_none());
        assert_eq!(app.bins.len(), 4);
        assert_eq!(app.guidelines.len(), 6);
        assert_eq!(app.agencies.len(), 2);
        assert_eq!(app.alerts.active().len(), 1);
        let message = app.error_message.as_deref().unwrap();
        assert!(message.contains("attendee"));
        assert!(message.contains("404"));

        app.redeem_selected();
        assert_eq!(app.error_message.as_deref(), Some("No attendee loaded"));
    }

    #[tokio::test]
    async fn guide_filter_and_modal() {
        let mut app = app();
        app.refresh().await;
        app.guide_query = String::from("food");
        app.guide_filter = GuideFilter::Compost;
        app.clamp_guide_index();
        app.open_selected_guideline();
        assert_eq!(
            app.open_guideline.as_ref().map(|entry| entry.waste_type.as_str()),
            Some("Food Waste")
        );

        app.open_guideline = None;
        app.guide_query = String::from("bottle");
        app.clamp_guide_index();
        app.open_selected_guideline();
        assert!(app.open_guideline.is_none());
    }

    #[tokio::test]
    async fn redeeming_keeps_points() {
        let mut app = app();
        app.refresh().await;

        app.reward_index = 0;
        app.redeem_selected();
        assert!(app.info_message.is_some());
        assert!(app.error_message.is_none());

        app.reward_index = 1;
        app.redeem_selected();
        assert!(app.error_message.as_deref().unwrap().contains("200 points needed"));
        assert_eq!(app.attendee.as_ref().unwrap().points, 150);
    }
}
