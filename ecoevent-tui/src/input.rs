use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, RewardTab, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Reload bins, guidelines, attendee, and agencies
    Refresh,
    /// Send the typed message to the selected agency
    SendMessage,
    /// Request an emergency pickup from the selected agency
    EmergencyPickup,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Esc, F, Left, Right, Tab as TabKey, Up};

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global shortcuts
    if key.code == Char('c') && ctrl {
        return Action::Quit;
    }
    if key.code == F(5) {
        return Action::Refresh;
    }

    // The guideline detail modal swallows everything until closed
    if app.open_guideline.is_some() {
        if matches!(key.code, Esc | Enter | Backspace) {
            app.open_guideline = None;
        }
        return Action::None;
    }

    match key.code {
        TabKey => {
            app.tab = app.tab.next();
            return Action::None;
        }
        BackTab => {
            app.tab = app.tab.previous();
            return Action::None;
        }
        _ => {}
    }

    if !app.tab.takes_text() && key.modifiers.is_empty() {
        match key.code {
            Char('q') => return Action::Quit,
            Char('r') => return Action::Refresh,
            Char(digit @ '1'..='4') => {
                let position = digit as usize - '1' as usize;
                if let Some(tab) = Tab::ALL.get(position) {
                    app.tab = *tab;
                }
                return Action::None;
            }
            _ => {}
        }
    }

    let mut action = Action::None;

    match app.tab {
        Tab::Bins => match key.code {
            Up | Char('k') => {
                app.bin_index = app.bin_index.saturating_sub(1);
            }
            Down | Char('j') => {
                if app.bin_index + 1 < app.bins.len() {
                    app.bin_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.show_bin_details = !app.show_bin_details;
            }
            Right | Char('l') if app.show_bin_details => {
                app.bin_detail = app.bin_detail.next();
            }
            Left | Char('h') if app.show_bin_details => {
                app.bin_detail = app.bin_detail.previous();
            }
            Esc => {
                app.show_bin_details = false;
            }
            _ => {}
        },

        Tab::Guide => match key.code {
            Up => {
                app.guide_index = app.guide_index.saturating_sub(1);
            }
            Down => {
                if app.guide_index + 1 < app.visible_guidelines().len() {
                    app.guide_index += 1;
                }
            }
            Left => {
                app.guide_filter = app.guide_filter.previous();
                app.clamp_guide_index();
            }
            Right => {
                app.guide_filter = app.guide_filter.next();
                app.clamp_guide_index();
            }
            Char(character) => {
                if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) {
                    app.guide_query.push(character);
                    app.guide_index = 0;
                }
            }
            Backspace => {
                app.guide_query.pop();
                app.guide_index = 0;
            }
            Enter => {
                app.open_selected_guideline();
            }
            Esc => {
                app.guide_query.clear();
                app.guide_index = 0;
            }
            _ => {}
        },

        Tab::Rewards => match key.code {
            Left | Char('h') => {
                app.reward_tab = app.reward_tab.previous();
            }
            Right | Char('l') => {
                app.reward_tab = app.reward_tab.next();
            }
            Up | Char('k') if app.reward_tab == RewardTab::Rewards => {
                app.reward_index = app.reward_index.saturating_sub(1);
            }
            Down | Char('j') if app.reward_tab == RewardTab::Rewards => {
                if app.reward_index + 1 < app.rewards.len() {
                    app.reward_index += 1;
                }
            }
            Enter if app.reward_tab == RewardTab::Rewards => {
                app.redeem_selected();
            }
            _ => {}
        },

        Tab::Agencies => match key.code {
            Up => {
                app.agency_index = app.agency_index.saturating_sub(1);
            }
            Down => {
                if app.agency_index + 1 < app.agencies.len() {
                    app.agency_index += 1;
                }
            }
            Char('e') if ctrl => {
                action = Action::EmergencyPickup;
            }
            Char(character) => {
                if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) {
                    app.message_input.push(character);
                }
            }
            Backspace => {
                app.message_input.pop();
            }
            Enter => {
                action = Action::SendMessage;
            }
            Esc => {
                app.message_input.clear();
            }
            _ => {}
        },
    }
    action
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use crossterm::event::KeyEvent;
    use ecoevent_core::{
        guide::GuideFilter,
        model::{AttendeeId, EventId},
        plugin::PluginRegistry,
        service::EcoEventService,
    };
    use ecoevent_provider_demo as demo;

    use super::*;
    use crate::alerts::AlertCenter;
    use crate::app::BinDetailTab;

    fn app() -> App {
        let registry = PluginRegistry::new(vec![demo::plugin(Utc::now())]);
        App::new(
            Arc::new(EcoEventService::new(Arc::new(registry))),
            EventId(String::from(demo::EVENT_ID)),
            AttendeeId(String::from("1")),
            AlertCenter::new(Duration::from_secs(5)),
        )
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    #[test]
    fn q_quits_outside_text_fields_only() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);

        app.tab = Tab::Guide;
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::None);
        assert_eq!(app.guide_query, "q");

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &mut app), Action::Quit);
    }

    #[test]
    fn tab_key_cycles_views() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Guide);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Agencies);
        app.tab = Tab::Bins;
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::Rewards);
    }

    #[test]
    fn bin_detail_tabs_need_details_open() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.bin_detail, BinDetailTab::Status);

        press(&mut app, KeyCode::Enter);
        assert!(app.show_bin_details);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.bin_detail, BinDetailTab::Analytics);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_bin_details);
    }

    #[test]
    fn guide_arrows_switch_filter() {
        let mut app = app();
        app.tab = Tab::Guide;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.guide_filter, GuideFilter::Recyclable);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.guide_filter, GuideFilter::Compost);
    }

    #[test]
    fn agency_keys_produce_actions() {
        let mut app = app();
        app.tab = Tab::Agencies;
        for character in "hi".chars() {
            press(&mut app, KeyCode::Char(character));
        }
        assert_eq!(app.message_input, "hi");
        assert_eq!(press(&mut app, KeyCode::Enter), Action::SendMessage);

        let ctrl_e = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_e, &mut app), Action::EmergencyPickup);
        assert_eq!(app.message_input, "hi");
    }
}
