//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use placeboard_core::apply::{ApplyOutcome, ApplyRequest};
use placeboard_core::seasons::{self, SeasonOption};
use placeboard_core::trends::TrendSeries;

use crate::common::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::dashboard::{DashboardState, View};
use crate::features::toast::Toast;
use crate::overlays::{
    Overlay, OverlayAction, OverlayTransition, ResumePickerState, SeasonPickerState,
};
use crate::state::{AppState, Load, Screen};

/// Effects to run before the first frame.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    match app.screen {
        Screen::Dashboard(_) => fetch_seasons(app),
        Screen::Salary(_) => fetch_salary_and_resumes(app),
    }
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            if let Some(toast) = app.toast.as_mut()
                && !toast.tick()
            {
                app.toast = None;
            }
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::SeasonsLoaded(result) => on_seasons_loaded(app, result),
        UiEvent::StatsLoaded { season_id, result } => {
            if let Screen::Dashboard(dash) = &mut app.screen {
                // A reply for a season that is no longer selected.
                if dash.selected.as_ref().map(|s| s.id.as_str()) != Some(season_id.as_str()) {
                    return vec![];
                }
                dash.stats = match result {
                    Ok(data) => Load::Loaded(data),
                    Err(e) => Load::Failed(e.headline().to_string()),
                };
                dash.clamp_cursor();
            }
            vec![]
        }
        UiEvent::TrendLoaded(series) => {
            if let Screen::Dashboard(dash) = &mut app.screen {
                dash.trend = Load::Loaded(series);
            }
            vec![]
        }
        UiEvent::SalaryLoaded(result) => {
            if let Screen::Salary(card) = &mut app.screen {
                match result {
                    Ok(salary) => card.salary = Load::Loaded(salary),
                    Err(message) => {
                        card.salary = Load::Failed(message.clone());
                        app.toast = Some(Toast::error(message));
                    }
                }
            }
            vec![]
        }
        UiEvent::ResumesLoaded(result) => {
            if let Screen::Salary(card) = &mut app.screen {
                card.resumes = match result {
                    Ok(resumes) => {
                        if card
                            .selected_resume
                            .as_ref()
                            .is_some_and(|id| !resumes.iter().any(|r| &r.id == id))
                        {
                            card.selected_resume = None;
                        }
                        Load::Loaded(resumes)
                    }
                    Err(message) => Load::Failed(message),
                };
            }
            vec![]
        }
        UiEvent::ApplyFinished(result) => {
            match result {
                Ok(outcome) => {
                    if let (Screen::Salary(card), Some(salary)) = (&mut app.screen, outcome.salary)
                    {
                        card.salary = Load::Loaded(salary);
                    }
                    app.toast = Some(Toast::success(ApplyOutcome::MESSAGE));
                }
                Err(e) => app.toast = Some(Toast::error(e.user_message())),
            }
            vec![]
        }
        UiEvent::ResumeOpened(result) => {
            app.toast = Some(match result {
                Ok(path) => Toast::info(format!("Opened {}", path.display())),
                Err(message) => Toast::error(message),
            });
            vec![]
        }
    }
}

/// Claims a fresh task id for `kind`, cancelling whatever it supersedes.
fn begin_task(app: &mut AppState, kind: TaskKind) -> (TaskId, Vec<UiEffect>) {
    let id = app.task_seq.next_id();
    let mut effects = Vec::new();
    if let Some(token) = app.tasks.state_mut(kind).begin(id) {
        effects.push(UiEffect::CancelTask {
            kind,
            token: Some(token),
        });
    }
    (id, effects)
}

fn fetch_seasons(app: &mut AppState) -> Vec<UiEffect> {
    let Screen::Dashboard(dash) = &mut app.screen else {
        return vec![];
    };
    dash.seasons = Load::Loading;
    dash.trend = Load::Idle;
    let (task, mut effects) = begin_task(app, TaskKind::Seasons);
    effects.push(UiEffect::FetchSeasons { task });
    effects
}

fn on_seasons_loaded(
    app: &mut AppState,
    result: Result<Vec<placeboard_types::SeasonSummary>, String>,
) -> Vec<UiEffect> {
    let Screen::Dashboard(dash) = &mut app.screen else {
        return vec![];
    };
    let options = match result {
        Ok(summaries) => seasons::build_options(summaries),
        Err(message) => {
            dash.seasons = Load::Failed(message.clone());
            app.toast = Some(Toast::error(message));
            return vec![];
        }
    };
    dash.seasons = Load::Loaded(options.clone());

    let requested = dash.requested_season.take();
    let mut chosen = requested
        .as_deref()
        .and_then(|id| options.iter().find(|o| o.id == id))
        .cloned();
    if chosen.is_none()
        && let Some(id) = requested
    {
        app.toast = Some(Toast::error(format!("Season {id} not found")));
    }

    if chosen.is_none() {
        // Keep the current season across reloads if it still exists.
        chosen = dash
            .selected
            .as_ref()
            .and_then(|current| options.iter().find(|o| o.id == current.id))
            .cloned();
    }
    if chosen.is_none() {
        let visible = dash.visible_seasons();
        chosen = seasons::default_selection(&visible)
            .or_else(|| seasons::default_selection(&options))
            .cloned();
    }

    match chosen {
        Some(option) => select_season(app, option),
        None => {
            dash.selected = None;
            dash.stats = Load::Idle;
            vec![]
        }
    }
}

fn select_season(app: &mut AppState, option: SeasonOption) -> Vec<UiEffect> {
    let Screen::Dashboard(dash) = &mut app.screen else {
        return vec![];
    };
    let season_id = option.id.clone();
    dash.selected = Some(option);
    dash.stats = Load::Loading;
    dash.cursor = 0;
    let (task, mut effects) = begin_task(app, TaskKind::Stats);
    effects.push(UiEffect::FetchStats { task, season_id });
    effects
}

fn fetch_trend(app: &mut AppState) -> Vec<UiEffect> {
    let Screen::Dashboard(dash) = &mut app.screen else {
        return vec![];
    };
    let seasons = dash.visible_seasons();
    if seasons.is_empty() {
        dash.trend = Load::Loaded(TrendSeries::default());
        return vec![];
    }
    dash.trend = Load::Loading;
    let (task, mut effects) = begin_task(app, TaskKind::Trend);
    effects.push(UiEffect::FetchTrend { task, seasons });
    effects
}

fn fetch_salary_and_resumes(app: &mut AppState) -> Vec<UiEffect> {
    let Screen::Salary(card) = &mut app.screen else {
        return vec![];
    };
    let salary_id = card.salary_id.clone();
    card.salary = Load::Loading;
    card.resumes = Load::Loading;

    let (task, mut effects) = begin_task(app, TaskKind::Salary);
    effects.push(UiEffect::FetchSalary { task, salary_id });
    let (task, cancels) = begin_task(app, TaskKind::Resumes);
    effects.extend(cancels);
    effects.push(UiEffect::FetchResumes { task });
    effects
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let result = overlay.handle_key(key);
        if result.transition == OverlayTransition::Close {
            app.overlay = None;
        }
        return match result.action {
            Some(action) => apply_overlay_action(app, action),
            None => vec![],
        };
    }

    match app.screen {
        Screen::Dashboard(_) => handle_dashboard_key(app, key),
        Screen::Salary(_) => handle_salary_key(app, key),
    }
}

fn apply_overlay_action(app: &mut AppState, action: OverlayAction) -> Vec<UiEffect> {
    match action {
        OverlayAction::SelectSeason(option) => {
            let unchanged = app
                .dashboard()
                .and_then(|d| d.selected.as_ref())
                .is_some_and(|current| current.id == option.id);
            let reload = app
                .dashboard()
                .is_some_and(|d| matches!(d.stats, Load::Failed(_)));
            if unchanged && !reload {
                vec![]
            } else {
                select_season(app, option)
            }
        }
        OverlayAction::SetYearRange(range) => {
            let Screen::Dashboard(dash) = &mut app.screen else {
                return vec![];
            };
            if dash.year_range == range {
                return vec![];
            }
            dash.year_range = range;
            if dash.trend.is_idle() {
                vec![]
            } else {
                fetch_trend(app)
            }
        }
        OverlayAction::SelectResume(id) => {
            if let Screen::Salary(card) = &mut app.screen {
                card.selected_resume = Some(id);
            }
            vec![]
        }
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Screen::Dashboard(dash) = &mut app.screen else {
        return vec![];
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('s') => {
            match dash.seasons.loaded() {
                Some(all) if !all.is_empty() => {
                    let current = dash.selected.as_ref().map(|s| s.id.as_str());
                    app.overlay = Some(Overlay::SeasonPicker(SeasonPickerState::open(
                        all.clone(),
                        dash.year_range,
                        current,
                    )));
                }
                _ => app.toast = Some(Toast::info("No seasons available")),
            }
            vec![]
        }
        KeyCode::Char('t') | KeyCode::Tab => {
            dash.view = dash.view.toggle();
            if dash.view == View::Trends && dash.trend.is_idle() {
                fetch_trend(app)
            } else {
                vec![]
            }
        }
        KeyCode::Char('v') => {
            dash.mode = dash.mode.toggle();
            vec![]
        }
        KeyCode::Char('d') | KeyCode::Down | KeyCode::Char('j') => {
            let next = dash.dimension.next();
            set_dimension(dash, next);
            vec![]
        }
        KeyCode::Char('D') | KeyCode::Up | KeyCode::Char('k') => {
            let prev = dash.dimension.prev();
            set_dimension(dash, prev);
            vec![]
        }
        KeyCode::Left | KeyCode::Char('h') => {
            dash.move_cursor(false);
            vec![]
        }
        KeyCode::Right | KeyCode::Char('l') => {
            dash.move_cursor(true);
            vec![]
        }
        KeyCode::Char('r') => reload_dashboard(app),
        _ => vec![],
    }
}

fn set_dimension(dash: &mut DashboardState, dimension: placeboard_types::Dimension) {
    dash.dimension = dimension;
    dash.cursor = 0;
}

fn reload_dashboard(app: &mut AppState) -> Vec<UiEffect> {
    let Some(dash) = app.dashboard() else {
        return vec![];
    };
    if !matches!(dash.seasons, Load::Loaded(_)) {
        return fetch_seasons(app);
    }
    if dash.view == View::Trends {
        return fetch_trend(app);
    }
    match dash.selected.clone() {
        Some(option) => select_season(app, option),
        None => fetch_seasons(app),
    }
}

fn handle_salary_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Screen::Salary(card) = &mut app.screen else {
        return vec![];
    };

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Enter | KeyCode::Char(' ') => {
            card.expanded = !card.expanded;
            if !card.expanded {
                card.scroll = 0;
            }
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            card.scroll = card.scroll.saturating_add(1);
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            card.scroll = card.scroll.saturating_sub(1);
            vec![]
        }
        KeyCode::Char('p') => {
            let resumes = card.resume_list();
            if resumes.is_empty() {
                app.toast = Some(Toast::info("No resumes uploaded"));
            } else {
                app.overlay = Some(Overlay::ResumePicker(ResumePickerState::open(
                    resumes.to_vec(),
                    card.selected_resume.as_deref(),
                )));
            }
            vec![]
        }
        KeyCode::Char('a') => start_apply(app),
        KeyCode::Char('o') => {
            let Some(filepath) = card.resume_to_open() else {
                app.toast = Some(Toast::info("No resume to open"));
                return vec![];
            };
            let (task, mut effects) = begin_task(app, TaskKind::OpenResume);
            effects.push(UiEffect::OpenResume { task, filepath });
            effects
        }
        KeyCode::Char('r') => fetch_salary_and_resumes(app),
        _ => vec![],
    }
}

fn start_apply(app: &mut AppState) -> Vec<UiEffect> {
    if app.tasks.state(TaskKind::Apply).is_running() {
        return vec![];
    }
    let Screen::Salary(card) = &app.screen else {
        return vec![];
    };

    let request = ApplyRequest {
        salary_id: &card.salary_id,
        selected_resume: card.selected_resume.as_deref(),
        resumes: card.resume_list(),
    };
    if let Err(e) = request.validate().map(|_| ()) {
        app.toast = Some(Toast::error(e.user_message()));
        return vec![];
    }

    let salary_id = card.salary_id.clone();
    let selected_resume = card.selected_resume.clone();
    let resumes = card.resume_list().to_vec();
    let (task, mut effects) = begin_task(app, TaskKind::Apply);
    effects.push(UiEffect::SubmitApplication {
        task,
        salary_id,
        selected_resume,
        resumes,
    });
    effects
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use placeboard_core::api::{ApiError, ApiErrorKind};
    use placeboard_core::apply::ApplyError;
    use placeboard_core::stats::{SeasonLoadError, StatsError, ViewMode};
    use placeboard_types::{
        Application, ApplicationResume, Dimension, Job, Resume, Salary, SeasonData, SeasonSummary,
        SeasonType, StatBucket,
    };

    use super::*;
    use crate::common::{TaskCompleted, TaskStarted};
    use crate::features::salary::SalaryState;
    use crate::features::toast::ToastKind;

    fn dashboard_app(requested: Option<&str>) -> AppState {
        AppState::new(Screen::Dashboard(DashboardState::new(
            ViewMode::Chart,
            (2020, 2025),
            requested.map(str::to_string),
        )))
    }

    fn salary_app() -> AppState {
        AppState::new(Screen::Salary(SalaryState::new(
            "sal-1".to_string(),
            SeasonType::Placement,
        )))
    }

    fn summary(id: &str, season_type: SeasonType, year: i32) -> SeasonSummary {
        SeasonSummary {
            id: id.to_string(),
            season_type,
            year,
        }
    }

    fn season_data() -> SeasonData {
        let bucket = StatBucket {
            placement_percentage: 80.0,
            ..StatBucket::default()
        };
        let map = |keys: &[&str]| -> BTreeMap<String, StatBucket> {
            keys.iter()
                .map(|k| ((*k).to_string(), bucket.clone()))
                .collect()
        };
        SeasonData {
            overall_stats: Some(bucket.clone()),
            department_wise_stats: map(&["CSE", "EE", "ME"]),
            category_wise_stats: map(&["GEN"]),
            gender_wise_stats: map(&["M", "F"]),
            course_wise_stats: map(&["BTech"]),
            academic_wise_stats: map(&["6-7", "7-8", "8-9", "9-10"]),
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn resume(id: &str) -> Resume {
        Resume {
            id: id.to_string(),
            name: format!("{id}.pdf"),
            filepath: format!("u/{id}.pdf"),
            verified: true,
        }
    }

    /// Runs a task result through the TaskCompleted path.
    fn complete(app: &mut AppState, kind: TaskKind, id: TaskId, event: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(event),
                },
            },
        )
    }

    fn load_seasons(app: &mut AppState) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::SeasonsLoaded(Ok(vec![
                summary("i24", SeasonType::Intern, 2024),
                summary("p24", SeasonType::Placement, 2024),
                summary("p23", SeasonType::Placement, 2023),
            ])),
        )
    }

    #[test]
    fn test_init_fetches_seasons() {
        let mut app = dashboard_app(None);
        let effects = init(&mut app);
        assert!(matches!(effects.as_slice(), [UiEffect::FetchSeasons { .. }]));
        assert!(app.dashboard().unwrap().seasons.is_loading());
        assert!(app.tasks.state(TaskKind::Seasons).is_running());
    }

    #[test]
    fn test_seasons_loaded_selects_first_sorted_season() {
        let mut app = dashboard_app(None);
        let effects = load_seasons(&mut app);

        let dash = app.dashboard().unwrap();
        assert_eq!(dash.selected.as_ref().unwrap().id, "p24");
        assert!(dash.stats.is_loading());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchStats { season_id, .. }] if season_id == "p24"
        ));
    }

    #[test]
    fn test_requested_season_wins_over_default() {
        let mut app = dashboard_app(Some("p23"));
        load_seasons(&mut app);
        assert_eq!(
            app.dashboard().unwrap().selected.as_ref().unwrap().id,
            "p23"
        );
    }

    #[test]
    fn test_unknown_requested_season_falls_back_with_toast() {
        let mut app = dashboard_app(Some("nope"));
        load_seasons(&mut app);
        assert_eq!(
            app.dashboard().unwrap().selected.as_ref().unwrap().id,
            "p24"
        );
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn test_seasons_error_sets_failed() {
        let mut app = dashboard_app(None);
        update(&mut app, UiEvent::SeasonsLoaded(Err("HTTP 500".to_string())));
        assert_eq!(
            app.dashboard().unwrap().seasons,
            Load::Failed("HTTP 500".to_string())
        );
    }

    #[test]
    fn test_stale_stats_reply_is_ignored() {
        let mut app = dashboard_app(None);
        load_seasons(&mut app);

        update(
            &mut app,
            UiEvent::StatsLoaded {
                season_id: "p23".to_string(),
                result: Ok(season_data()),
            },
        );
        assert!(app.dashboard().unwrap().stats.is_loading());

        update(
            &mut app,
            UiEvent::StatsLoaded {
                season_id: "p24".to_string(),
                result: Ok(season_data()),
            },
        );
        assert!(app.dashboard().unwrap().stats.loaded().is_some());
    }

    #[test]
    fn test_superseded_stats_task_completion_is_dropped() {
        let mut app = dashboard_app(None);
        let first = load_seasons(&mut app);
        let UiEffect::FetchStats { task: stale, .. } = first[0] else {
            panic!("expected FetchStats");
        };

        let option = app.dashboard().unwrap().visible_seasons()[1].clone();
        let effects = apply_overlay_action(&mut app, OverlayAction::SelectSeason(option));
        assert!(matches!(effects.as_slice(), [UiEffect::FetchStats { .. }]));

        complete(
            &mut app,
            TaskKind::Stats,
            stale,
            UiEvent::StatsLoaded {
                season_id: "p24".to_string(),
                result: Ok(season_data()),
            },
        );
        assert!(app.dashboard().unwrap().stats.is_loading());
    }

    #[test]
    fn test_reselect_cancels_started_stats_task() {
        let mut app = dashboard_app(None);
        let first = load_seasons(&mut app);
        let UiEffect::FetchStats { task, .. } = first[0] else {
            panic!("expected FetchStats");
        };
        let token = tokio_util::sync::CancellationToken::new();
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Stats,
                started: TaskStarted {
                    id: task,
                    cancel: Some(token.clone()),
                },
            },
        );

        let option = app.dashboard().unwrap().visible_seasons()[2].clone();
        let effects = apply_overlay_action(&mut app, OverlayAction::SelectSeason(option));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelTask { kind: TaskKind::Stats, token: Some(_) }, UiEffect::FetchStats { .. }]
        ));
    }

    #[test]
    fn test_invalid_stats_show_headline() {
        let mut app = dashboard_app(None);
        load_seasons(&mut app);
        update(
            &mut app,
            UiEvent::StatsLoaded {
                season_id: "p24".to_string(),
                result: Err(SeasonLoadError::Invalid(StatsError::MissingDimension(
                    "gender",
                ))),
            },
        );
        assert_eq!(
            app.dashboard().unwrap().stats,
            Load::Failed("Unable to fetch the data".to_string())
        );
    }

    #[test]
    fn test_trend_fetched_once_on_first_toggle() {
        let mut app = dashboard_app(None);
        load_seasons(&mut app);

        let effects = update(&mut app, key(KeyCode::Char('t')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchTrend { seasons, .. }] if seasons.len() == 3
        ));
        update(&mut app, UiEvent::TrendLoaded(TrendSeries::default()));

        update(&mut app, key(KeyCode::Char('t')));
        let effects = update(&mut app, key(KeyCode::Char('t')));
        assert!(effects.is_empty());
        assert_eq!(app.dashboard().unwrap().view, View::Trends);
    }

    #[test]
    fn test_year_range_edit_refetches_loaded_trend() {
        let mut app = dashboard_app(None);
        load_seasons(&mut app);
        update(&mut app, key(KeyCode::Char('t')));
        update(&mut app, UiEvent::TrendLoaded(TrendSeries::default()));

        update(&mut app, key(KeyCode::Char('s')));
        let mut effects = Vec::new();
        for _ in 0..4 {
            effects = update(&mut app, key(KeyCode::Char(']')));
        }
        assert_eq!(app.dashboard().unwrap().year_range, (2024, 2025));
        assert!(app.overlay.is_some());
        assert!(effects.iter().any(|e| matches!(
            e,
            UiEffect::FetchTrend { seasons, .. } if seasons.len() == 2
        )));
    }

    #[test]
    fn test_year_range_edit_before_trend_fetch_is_lazy() {
        let mut app = dashboard_app(None);
        load_seasons(&mut app);
        update(&mut app, key(KeyCode::Char('s')));
        let effects = update(&mut app, key(KeyCode::Char('[')));
        assert!(effects.is_empty());
        assert_eq!(app.dashboard().unwrap().year_range, (2019, 2025));
    }

    #[test]
    fn test_dimension_change_resets_cursor() {
        let mut app = dashboard_app(None);
        load_seasons(&mut app);
        update(
            &mut app,
            UiEvent::StatsLoaded {
                season_id: "p24".to_string(),
                result: Ok(season_data()),
            },
        );
        update(&mut app, key(KeyCode::Right));
        update(&mut app, key(KeyCode::Right));
        assert_eq!(app.dashboard().unwrap().cursor, 2);

        update(&mut app, key(KeyCode::Char('d')));
        let dash = app.dashboard().unwrap();
        assert_eq!(dash.dimension, Dimension::Department);
        assert_eq!(dash.cursor, 0);
    }

    #[test]
    fn test_mode_toggle() {
        let mut app = dashboard_app(None);
        update(&mut app, key(KeyCode::Char('v')));
        assert_eq!(app.dashboard().unwrap().mode, ViewMode::Table);
    }

    #[test]
    fn test_season_picker_opens_and_selects() {
        let mut app = dashboard_app(None);
        load_seasons(&mut app);
        update(&mut app, key(KeyCode::Char('s')));
        assert!(matches!(app.overlay, Some(Overlay::SeasonPicker(_))));

        update(&mut app, key(KeyCode::Down));
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(app.overlay.is_none());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchStats { season_id, .. }] if season_id == "i24"
        ));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = dashboard_app(None);
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        let effects = update(&mut app, UiEvent::Terminal(Event::Key(release)));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_salary_init_fetches_card_and_resumes() {
        let mut app = salary_app();
        let effects = init(&mut app);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchSalary { salary_id, .. }, UiEffect::FetchResumes { .. }]
                if salary_id == "sal-1"
        ));
    }

    #[test]
    fn test_apply_without_resume_toasts_and_skips_request() {
        let mut app = salary_app();
        update(&mut app, UiEvent::ResumesLoaded(Ok(vec![resume("r1")])));
        let effects = update(&mut app, key(KeyCode::Char('a')));
        assert!(effects.is_empty());
        assert_eq!(app.toast.as_ref().unwrap().message, "Please select a resume");
    }

    #[test]
    fn test_apply_with_selected_resume_submits() {
        let mut app = salary_app();
        update(&mut app, UiEvent::ResumesLoaded(Ok(vec![resume("r1")])));
        update(&mut app, key(KeyCode::Char('p')));
        update(&mut app, key(KeyCode::Enter));

        let effects = update(&mut app, key(KeyCode::Char('a')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SubmitApplication { selected_resume: Some(id), .. }] if id == "r1"
        ));
    }

    #[test]
    fn test_reapply_with_another_resume_after_prior_application() {
        let mut app = salary_app();
        let applied = Salary {
            id: "sal-1".to_string(),
            job: Job {
                applications: vec![Application {
                    id: "app-1".to_string(),
                    resume: ApplicationResume {
                        id: "r1".to_string(),
                        filepath: "u/r1.pdf".to_string(),
                        verified: true,
                    },
                }],
                ..Job::default()
            },
            ..Salary::default()
        };
        update(&mut app, UiEvent::SalaryLoaded(Ok(applied)));
        update(
            &mut app,
            UiEvent::ResumesLoaded(Ok(vec![resume("r1"), resume("r2")])),
        );
        update(&mut app, key(KeyCode::Char('p')));
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Enter));

        let effects = update(&mut app, key(KeyCode::Char('a')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SubmitApplication { selected_resume: Some(id), .. }] if id == "r2"
        ));
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_apply_success_replaces_salary_and_toasts() {
        let mut app = salary_app();
        let refreshed = Salary {
            id: "sal-1".to_string(),
            job: Job {
                role: "SDE".to_string(),
                ..Job::default()
            },
            ..Salary::default()
        };
        update(
            &mut app,
            UiEvent::ApplyFinished(Ok(ApplyOutcome {
                salary: Some(refreshed.clone()),
            })),
        );
        assert_eq!(app.salary().unwrap().salary, Load::Loaded(refreshed));
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "Applied Successfully");
    }

    #[test]
    fn test_apply_unauthorized_toasts_eligibility_message() {
        let mut app = salary_app();
        update(
            &mut app,
            UiEvent::ApplyFinished(Err(ApplyError::NotAuthorized(ApiError::new(
                ApiErrorKind::Unauthorized,
                "HTTP 401",
            )))),
        );
        assert!(
            app.toast
                .as_ref()
                .unwrap()
                .message
                .starts_with("You are not authorized to apply")
        );
    }

    #[test]
    fn test_tick_expires_toast() {
        let mut app = dashboard_app(None);
        app.toast = Some(Toast::info("hello"));
        for _ in 0..40 {
            update(&mut app, UiEvent::Tick);
        }
        assert!(app.toast.is_none());
    }
}
