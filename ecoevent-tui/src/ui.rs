use chrono::{DateTime, Local, Utc};
use ecoevent_core::{
    guide::GuideFilter,
    messaging::NoticeKind,
    model::{Attendee, Bin, BinCategory, DisposalGuideline, MaintenanceAction},
    rewards::{AchievementSummary, RewardKind, TierColor},
    telemetry::{self, BinAnalytics, BinReading, StatusTier},
};
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Cell, Clear, Gauge, List, ListItem, ListState, Paragraph, Row, Table, Tabs,
        Wrap,
    },
};

use crate::app::{App, BinDetailTab, RewardTab, Tab};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, tab bar, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, tabs_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(format!("Eco-Event Manager – {}", app.event_name))
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("ecoevent"));
    frame.render_widget(header, *header_area);

    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    frame.render_widget(tabs, *tabs_area);

    match app.tab {
        Tab::Bins => draw_bins(frame, app, *content_area),
        Tab::Guide => draw_guide(frame, app, *content_area),
        Tab::Rewards => draw_rewards(frame, app, *content_area),
        Tab::Agencies => draw_agencies(frame, app, *content_area),
    }

    draw_alerts(frame, app, *content_area);

    if let Some(guideline) = &app.open_guideline {
        draw_guideline_modal(frame, guideline, area);
    }

    draw_status(frame, app, *status_area);
}

fn draw_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let nav_hint = match app.tab {
        _ if app.open_guideline.is_some() => "Esc/Enter close · Ctrl-C quit",
        Tab::Bins => "Tab switch view · ↑/↓ bin · Enter details · ←/→ detail tab · r refresh · q quit",
        Tab::Guide => "Type to search · ←/→ filter · ↑/↓ move · Enter details · Esc clear · Ctrl-C quit",
        Tab::Rewards => "Tab switch view · ←/→ section · ↑/↓ reward · Enter redeem · q quit",
        Tab::Agencies => "Type message · Enter send · Ctrl-E emergency pickup · ↑/↓ agency · Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else if let Some(msg) = &app.info_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else if app.info_message.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, area);
}

fn draw_alerts(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let alerts = app.alerts.active();
    if alerts.is_empty() {
        return;
    }

    let locations = alerts
        .iter()
        .map(|alert| alert.location.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let text = format!("🔔 Bin nearly full! {locations}");
    let width = u16::try_from(text.chars().count() + 4)
        .unwrap_or(u16::MAX)
        .min(area.width);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: 3.min(area.height),
    };

    let banner = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, popup);
    frame.render_widget(banner, popup);
}

// ---------------------------------------------------------------------------
// Bins
// ---------------------------------------------------------------------------

fn draw_bins(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [list_area, detail_area] = chunks else {
        return;
    };

    let items = if app.bins.is_empty() {
        vec![ListItem::new("No bins reported yet. Press r to refresh.")]
    } else {
        app.bins
            .iter()
            .map(|bin| {
                let (label, color) = match telemetry::fill_percentage(bin) {
                    Ok(pct) => (
                        format!("{pct:>5.1}%"),
                        tier_color(StatusTier::from_percentage(pct)),
                    ),
                    Err(_) => ("  err".to_owned(), Color::Magenta),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", category_icon(bin.category)), Style::default()),
                    Span::styled(label, Style::default().fg(color)),
                    Span::raw(format!("  {}", bin.location)),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Smart bins (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.bins.is_empty() {
        state.select(Some(app.bin_index));
    }
    frame.render_stateful_widget(list, *list_area, &mut state);

    let Some(bin) = app.selected_bin() else {
        let paragraph = Paragraph::new("Select a bin to see its status.")
            .block(Block::default().borders(Borders::ALL).title("Bin"));
        frame.render_widget(paragraph, *detail_area);
        return;
    };

    let title = format!("{} bin · {}", capitalize(&bin.category.to_string()), bin.location);

    let reading = match BinReading::evaluate(bin, app.now) {
        Ok(reading) => reading,
        Err(err) => {
            let paragraph = Paragraph::new(format!("Telemetry unavailable: {err}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title(title))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, *detail_area);
            return;
        }
    };

    if app.show_bin_details {
        draw_bin_details(frame, app, bin, &reading, *detail_area, title);
    } else {
        draw_bin_summary(frame, bin, &reading, *detail_area, title);
    }
}

fn draw_bin_summary(frame: &mut Frame<'_>, bin: &Bin, reading: &BinReading, area: Rect, title: String) {
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let chunks = layout_chunks.as_ref();
    let [gauge_area, facts_area] = chunks else {
        return;
    };

    frame.render_widget(fill_gauge(reading), *gauge_area);

    let color = tier_color(reading.tier);
    let facts = vec![
        Line::from(vec![
            Span::styled("Location:   ", Style::default().fg(Color::Gray)),
            Span::raw(bin.location.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Fill Level: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{:.1}%", reading.percentage), Style::default().fg(color)),
            Span::styled(format!(" ({})", reading.tier.label()), Style::default().fg(color)),
        ]),
    ];
    frame.render_widget(Paragraph::new(facts).wrap(Wrap { trim: true }), *facts_area);
}

fn draw_bin_details(
    frame: &mut Frame<'_>,
    app: &App,
    bin: &Bin,
    reading: &BinReading,
    area: Rect,
    title: String,
) {
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let chunks = layout_chunks.as_ref();
    let [tabs_area, body_area] = chunks else {
        return;
    };

    let tabs = Tabs::new(BinDetailTab::ALL.iter().map(|tab| tab.title()))
        .select(app.bin_detail.index())
        .highlight_style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
        );
    frame.render_widget(tabs, *tabs_area);

    let lines = match app.bin_detail {
        BinDetailTab::Status => status_lines(bin, reading),
        BinDetailTab::Maintenance => maintenance_lines(bin, app.now),
        BinDetailTab::Analytics => analytics_lines(bin, app.now),
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), *body_area);
}

fn status_lines(bin: &Bin, reading: &BinReading) -> Vec<Line<'static>> {
    let mut lines = vec![
        labeled("Sensor ID", bin.sensor_id.clone().unwrap_or_else(|| "N/A".to_owned())),
        labeled("Last Emptied", local_date(bin.last_emptied)),
    ];
    if let Some(prediction) = reading.prediction_label() {
        lines.push(Line::from(vec![
            Span::styled("Prediction:   ", Style::default().fg(Color::Gray)),
            Span::styled(prediction, Style::default().fg(Color::Blue)),
        ]));
    }
    lines.push(labeled("Capacity", format!("{} liters", bin.capacity)));
    lines.push(labeled(
        "Fill Level",
        format!("{:.1} / {} liters", bin.current_level, bin.capacity),
    ));
    lines
}

fn maintenance_lines(bin: &Bin, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match telemetry::maintenance_status(bin, now) {
        Some(status) => {
            let (label, color) = if status.needs_maintenance {
                ("Needs Attention", Color::Red)
            } else {
                ("Good", Color::Green)
            };
            lines.push(Line::from(vec![
                Span::styled("Maintenance Status: ", Style::default().fg(Color::Gray)),
                Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(format!(" ({} days since last visit)", status.days_since)),
            ]));
        }
        None => lines.push(Line::styled(
            "No maintenance recorded",
            Style::default().fg(Color::Gray),
        )),
    }
    lines.push(Line::raw(""));

    let mut records = bin.maintenance_history.clone();
    records.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
    for record in records {
        let color = match record.action {
            MaintenanceAction::Emptied => Color::Blue,
            MaintenanceAction::Cleaned => Color::Green,
            MaintenanceAction::Repaired => Color::Yellow,
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", record.action), Style::default().fg(color)),
            Span::styled(local_date(record.timestamp), Style::default().fg(Color::Gray)),
        ]));
        if let Some(notes) = record.notes {
            lines.push(Line::raw(format!("  {notes}")));
        }
    }
    lines
}

fn analytics_lines(bin: &Bin, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let analytics = match BinAnalytics::evaluate(bin, now) {
        Ok(analytics) => analytics,
        Err(err) => {
            return vec![Line::styled(
                format!("Analytics unavailable: {err}"),
                Style::default().fg(Color::Red),
            )];
        }
    };

    vec![
        labeled(
            "Since Emptied",
            format!("{:.1} hours", analytics.hours_since_emptied),
        ),
        labeled(
            "Fill Rate",
            analytics
                .fill_rate_lph
                .map_or_else(|| "no fill recorded".to_owned(), |rate| format!("{rate:.2} liters/hour")),
        ),
        labeled("Collections", analytics.emptied_count.to_string()),
        labeled(
            "Average Cycle",
            analytics
                .mean_hours_between_emptied
                .map_or_else(|| "not enough collections".to_owned(), |hours| format!("{hours:.0} hours")),
        ),
    ]
}

fn fill_gauge(reading: &BinReading) -> Gauge<'static> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Fill level"))
        .gauge_style(Style::default().fg(tier_color(reading.tier)))
        .ratio((reading.percentage / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", reading.percentage))
}

// ---------------------------------------------------------------------------
// Guide
// ---------------------------------------------------------------------------

fn draw_guide(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Length(3), // filter buttons
            Constraint::Min(0),    // results
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, filter_area, results_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.guide_query.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search waste types or instructions"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let selected_filter = GuideFilter::ALL
        .iter()
        .position(|filter| *filter == app.guide_filter)
        .unwrap_or_default();
    let filters = Tabs::new(GuideFilter::ALL.iter().map(|filter| capitalize(&filter.to_string())))
        .select(selected_filter)
        .block(Block::default().borders(Borders::ALL).title("Filter (←/→)"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(filters, *filter_area);

    let visible = app.visible_guidelines();
    let items = if visible.is_empty() {
        vec![ListItem::new("No guidelines match your search.")]
    } else {
        visible
            .iter()
            .map(|guideline| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            guideline.waste_type.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            guideline.category.to_string(),
                            Style::default().fg(category_color(guideline.category)),
                        ),
                    ]),
                    Line::styled(
                        format!("  {}", guideline.instructions),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Guidelines ({}) · Enter for details", visible.len())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.guide_index));
    }
    frame.render_stateful_widget(list, *results_area, &mut state);
}

fn draw_guideline_modal(
    frame: &mut Frame<'_>,
    guideline: &DisposalGuideline,
    area: Rect,
) {
    let popup = centered_rect(70, 80, area);

    let heading = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Bin: ", Style::default().fg(Color::Gray)),
            Span::styled(
                guideline.category.to_string(),
                Style::default().fg(category_color(guideline.category)),
            ),
        ]),
        Line::raw(""),
        Line::styled("Instructions", heading),
        Line::raw(guideline.instructions.clone()),
        Line::raw(""),
        Line::styled("Additional Tips", heading),
    ];
    lines.extend(
        guideline
            .tips
            .iter()
            .map(|tip| Line::raw(format!("  • {tip}"))),
    );
    lines.push(Line::raw(""));
    lines.push(Line::styled("Environmental Impact", heading));
    lines.push(Line::raw(guideline.environmental_impact.clone()));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("Image: {}", guideline.image_url),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(code) = &guideline.qr_code {
        lines.push(Line::styled(
            format!("QR: {code}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (Esc to close)", guideline.waste_type)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

fn draw_rewards(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(attendee) = &app.attendee else {
        let paragraph = Paragraph::new("No attendee loaded. Press r to refresh.")
            .block(Block::default().borders(Borders::ALL).title("Rewards"));
        frame.render_widget(paragraph, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // profile
            Constraint::Length(3), // progress
            Constraint::Length(2), // sections
            Constraint::Min(0),    // body
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [profile_area, progress_area, tabs_area, body_area] = chunks else {
        return;
    };

    let progress = app.levels.progress(attendee.points);
    let accent = level_color(progress.current.color);

    let profile = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(attendee.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" · "),
            Span::styled(progress.current.name.clone(), Style::default().fg(accent)),
        ]),
        Line::from(vec![
            Span::styled("Total Points: ", Style::default().fg(Color::Gray)),
            Span::styled(attendee.points.to_string(), Style::default().fg(Color::Green)),
            Span::styled("   Waste Saved: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}kg", attendee.total_waste_saved_kg.unwrap_or_default()),
                Style::default().fg(Color::Blue),
            ),
        ]),
    ])
    .block(Block::default().borders(Borders::TOP | Borders::LEFT | Borders::RIGHT));
    frame.render_widget(profile, *profile_area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            "{} → {}",
            progress.current.name, progress.next.name
        )))
        .gauge_style(Style::default().fg(accent))
        .ratio((progress.percent / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} points · {} points needed",
            attendee.points, progress.next.threshold
        ));
    frame.render_widget(gauge, *progress_area);

    let tabs = Tabs::new(RewardTab::ALL.iter().map(|tab| tab.title()))
        .select(app.reward_tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
        );
    frame.render_widget(tabs, *tabs_area);

    match app.reward_tab {
        RewardTab::Rewards => draw_reward_catalog(frame, app, attendee.points, *body_area),
        RewardTab::History => draw_history(frame, attendee, *body_area),
        RewardTab::Achievements => {
            let summary = AchievementSummary::for_attendee(attendee, &app.levels);
            draw_achievements(frame, &summary, *body_area);
        }
    }
}

fn draw_reward_catalog(frame: &mut Frame<'_>, app: &App, points: u32, area: Rect) {
    let items = app
        .rewards
        .iter()
        .map(|reward| {
            let (badge, style) = if reward.is_redeemable(points) {
                ("[Redeem]", Style::default().fg(Color::Green))
            } else {
                ("[Locked]", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", reward_icon(reward.kind))),
                Span::styled(format!("{:<32}", reward.description), Style::default()),
                Span::styled(format!("{:>5} points ", reward.points), Style::default().fg(Color::Gray)),
                Span::styled(badge, style),
            ]))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Rewards (↑/↓, Enter to redeem)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.rewards.is_empty() {
        state.select(Some(app.reward_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_history(frame: &mut Frame<'_>, attendee: &Attendee, area: Rect) {
    let rows = attendee.history.iter().map(|entry| {
        let mut source = Vec::new();
        if let Some(bin) = &entry.bin_id {
            source.push(format!("Bin: {bin}"));
        }
        if let Some(verifier) = &entry.verified_by {
            source.push(format!("Verified by: {verifier}"));
        }
        Row::new(vec![
            Cell::from(local_date(entry.timestamp)),
            Cell::from(entry.actions.join("; ")),
            Cell::from(source.join(" · ")),
            Cell::from(format!("+{}", entry.points)).style(Style::default().fg(Color::Green)),
        ])
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Min(30),
        Constraint::Length(34),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Date", "Actions", "Source", "Points"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("History"))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_achievements(frame: &mut Frame<'_>, summary: &AchievementSummary, area: Rect) {
    let mut lines = vec![Line::styled(
        "Badges",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if summary.badges.is_empty() {
        lines.push(Line::styled("  none yet", Style::default().fg(Color::Gray)));
    }
    lines.extend(summary.badges.iter().map(|badge| {
        Line::from(vec![
            Span::styled("  ★ ", Style::default().fg(Color::Yellow)),
            Span::raw(badge.clone()),
        ])
    }));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Statistics",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(stat("Total Actions", summary.total_actions.to_string(), Color::Blue));
    lines.push(stat("Total Points", summary.total_points.to_string(), Color::Green));
    lines.push(stat("Current Level", summary.level.to_string(), Color::Magenta));
    lines.push(stat("Waste Saved", format!("{}kg", summary.waste_saved_kg), Color::Yellow));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Achievements"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Agencies
// ---------------------------------------------------------------------------

fn draw_agencies(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [agency_area, message_area] = chunks else {
        return;
    };

    let items = app
        .agencies
        .iter()
        .map(|agency| {
            let mut lines = vec![
                Line::styled(agency.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Line::styled(format!("  {}", agency.contact), Style::default().fg(Color::Gray)),
                Line::styled(
                    format!("  Available: {}", agency.availability),
                    Style::default().fg(Color::Gray),
                ),
                Line::styled(
                    format!("  {}", agency.specializations.join(" · ")),
                    Style::default().fg(Color::Green),
                ),
            ];
            if let Some(next) = agency.next_scheduled_pickup {
                lines.push(Line::styled(
                    format!("  Next pickup: {}", local_date(next)),
                    Style::default().fg(Color::Blue),
                ));
            }
            ListItem::new(lines)
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Available agencies (↑/↓)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.agencies.is_empty() {
        state.select(Some(app.agency_index));
    }
    frame.render_stateful_widget(list, *agency_area, &mut state);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(*message_area);

    let chunks = layout_chunks.as_ref();
    let [input_area, log_area] = chunks else {
        return;
    };

    let recipient = app
        .selected_agency()
        .map_or("<no agency>", |agency| agency.name.as_str());
    let input = Paragraph::new(app.message_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Message to {recipient} (Enter to send)")),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(input, *input_area);

    let notices = if app.messages.is_empty() {
        vec![ListItem::new("No notifications yet.")]
    } else {
        app.messages
            .notices()
            .iter()
            .map(|notice| {
                let color = match notice.kind {
                    NoticeKind::Message => Color::Reset,
                    NoticeKind::EmergencyPickup => Color::Red,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        notice.sent_at.with_timezone(&Local).format("%H:%M ").to_string(),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(notice.text.clone(), Style::default().fg(color)),
                ]))
            })
            .collect()
    };

    let log = List::new(notices).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent notifications"),
    );
    frame.render_widget(log, *log_area);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn labeled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn stat(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<14}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn local_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%d.%m.%Y").to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let [_, middle, _] = vertical.as_ref() else {
        return area;
    };

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(*middle);
    let [_, center, _] = horizontal.as_ref() else {
        return *middle;
    };
    *center
}

fn tier_color(tier: StatusTier) -> Color {
    match tier {
        StatusTier::Nominal => Color::Green,
        StatusTier::Warning => Color::Yellow,
        StatusTier::Critical => Color::Red,
    }
}

fn level_color(color: TierColor) -> Color {
    match color {
        TierColor::Gray => Color::Gray,
        TierColor::Green => Color::Green,
        TierColor::Blue => Color::Blue,
        TierColor::Purple => Color::Magenta,
        TierColor::Yellow => Color::Yellow,
    }
}

fn category_color(category: BinCategory) -> Color {
    match category {
        BinCategory::General => Color::Gray,
        BinCategory::Recyclable => Color::Green,
        BinCategory::Compost => Color::Yellow,
    }
}

fn category_icon(category: BinCategory) -> &'static str {
    match category {
        BinCategory::General => "🗑",
        BinCategory::Recyclable => "♻",
        BinCategory::Compost => "🍂",
    }
}

fn reward_icon(kind: RewardKind) -> &'static str {
    match kind {
        RewardKind::Gift => "🎁",
        RewardKind::Award => "🏆",
        RewardKind::Medal => "🏅",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_category_slugs() {
        assert_eq!(capitalize("recyclable"), "Recyclable");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn popup_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(70, 80, area);
        assert!(popup.width <= 70 && popup.height <= 40);
        assert!(popup.x >= 15 && popup.y >= 5);
    }

    #[test]
    fn tier_colors_follow_traffic_light() {
        assert_eq!(tier_color(StatusTier::Nominal), Color::Green);
        assert_eq!(tier_color(StatusTier::Warning), Color::Yellow);
        assert_eq!(tier_color(StatusTier::Critical), Color::Red);
    }
}
