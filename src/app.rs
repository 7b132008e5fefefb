use crate::config::Config;
use crate::datasources::Catalog;
use crate::db::{Database, SETTING_LANGUAGE, SETTING_THEME};
use crate::error::Result;
use crate::logic::{auth, ChatBot, FilterCriteria, MonitorUpdate, ResourceEstimate};
use crate::models::{
    analytics, Cart, ChartSeries, ChatMessage, CropRecord, Language, MonitoringSnapshot,
    SensorReading, Season, Session, WeatherDay, PRODUCTS,
};
use crate::ui::ThemeMode;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

/// Chat messages restored from the database at start.
const CHAT_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Dashboard,
    Crops,
    Chat,
    Shop,
    Analytics,
    Calculator,
}

impl Screen {
    /// Tabs reachable once logged in, in sidebar order.
    pub fn tabs() -> &'static [Screen] {
        &[
            Screen::Dashboard,
            Screen::Crops,
            Screen::Chat,
            Screen::Shop,
            Screen::Analytics,
            Screen::Calculator,
        ]
    }

    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Crops),
            '3' => Some(Screen::Chat),
            '4' => Some(Screen::Shop),
            '5' => Some(Screen::Analytics),
            '6' => Some(Screen::Calculator),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Landing => "Welcome",
            Screen::Dashboard => "Dashboard",
            Screen::Crops => "Crops",
            Screen::Chat => "Farm Assistant",
            Screen::Shop => "Shop",
            Screen::Analytics => "Analytics",
            Screen::Calculator => "Calculator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
    Phone,
    Google,
}

impl LoginField {
    pub fn next(&self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Phone,
            LoginField::Phone => LoginField::Google,
            LoginField::Google => LoginField::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginField::Email => LoginField::Google,
            LoginField::Password => LoginField::Email,
            LoginField::Phone => LoginField::Password,
            LoginField::Google => LoginField::Phone,
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, LoginField::Google)
    }
}

pub struct LoginState {
    pub modal_open: bool,
    pub sign_up: bool,
    pub field: LoginField,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            modal_open: false,
            sign_up: false,
            field: LoginField::Email,
            email: String::new(),
            password: String::new(),
            phone: String::new(),
        }
    }

    pub fn open(&mut self, sign_up: bool) {
        self.modal_open = true;
        self.sign_up = sign_up;
        self.field = LoginField::Email;
    }

    pub fn close(&mut self) {
        *self = Self::new();
    }

    pub fn title(&self) -> &'static str {
        if self.sign_up {
            "Sign Up to SmartFarm"
        } else {
            "Login to SmartFarm"
        }
    }

    pub fn active_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            LoginField::Email => Some(&mut self.email),
            LoginField::Password => Some(&mut self.password),
            LoginField::Phone => Some(&mut self.phone),
            LoginField::Google => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropsFocus {
    Search,
    Season,
    State,
    List,
}

impl CropsFocus {
    pub fn next(&self) -> Self {
        match self {
            CropsFocus::Search => CropsFocus::Season,
            CropsFocus::Season => CropsFocus::State,
            CropsFocus::State => CropsFocus::List,
            CropsFocus::List => CropsFocus::Search,
        }
    }
}

pub struct CropsState {
    pub search: String,
    /// Index into `[All] + catalog seasons`
    pub season_idx: usize,
    /// Index into `[All] + catalog states`
    pub state_idx: usize,
    pub focus: CropsFocus,
    pub selected_index: usize,
    pub matches: Vec<u32>,
    pub show_details: bool,
}

impl CropsState {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            season_idx: 0,
            state_idx: 0,
            focus: CropsFocus::List,
            selected_index: 0,
            matches: Vec::new(),
            show_details: false,
        }
    }

    pub fn criteria(&self, seasons: &[Season], states: &[String]) -> FilterCriteria {
        let mut criteria = FilterCriteria::new().with_search(self.search.as_str());
        if let Some(season) = self.season_idx.checked_sub(1).and_then(|i| seasons.get(i)) {
            criteria = criteria.with_season(season.clone());
        }
        if let Some(state) = self.state_idx.checked_sub(1).and_then(|i| states.get(i)) {
            criteria = criteria.with_state(state.as_str());
        }
        criteria
    }

    pub fn next(&mut self) {
        if !self.matches.is_empty() && self.selected_index < self.matches.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub typing: bool,
}

impl ChatState {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            input: String::new(),
            typing: false,
        }
    }
}

pub struct ShopState {
    pub selected_index: usize,
}

impl ShopState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self) {
        if self.selected_index < PRODUCTS.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct CalculatorState {
    pub area_input: String,
    /// Crop picked for labelling the result; `None` means unspecified
    pub crop_idx: Option<usize>,
    pub typing: bool,
    pub result: Option<ResourceEstimate>,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            area_input: String::new(),
            crop_idx: None,
            typing: false,
            result: None,
        }
    }

    pub fn cycle_crop(&mut self, count: usize) {
        self.crop_idx = match self.crop_idx {
            _ if count == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
        };
    }
}

pub struct DashboardState {
    pub selected_crop: usize,
}

impl DashboardState {
    pub fn new() -> Self {
        Self { selected_crop: 0 }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,
    pub catalog: Catalog,

    // Session and preferences
    pub session: Option<Session>,
    pub language: Language,
    pub theme_mode: ThemeMode,
    pub sidebar_visible: bool,

    // Data
    pub sensors: Option<SensorReading>,
    pub monitoring: Option<MonitoringSnapshot>,
    pub forecast: Vec<WeatherDay>,
    pub cart: Cart,
    pub farm_crops: Vec<u32>,
    pub soil_health: ChartSeries,
    pub water_usage: ChartSeries,
    pub seasons: Vec<Season>,
    pub states: Vec<String>,

    // Screen states
    pub login_state: LoginState,
    pub dashboard_state: DashboardState,
    pub crops_state: CropsState,
    pub chat_state: ChatState,
    pub shop_state: ShopState,
    pub calculator_state: CalculatorState,

    // Services
    pub chat_bot: ChatBot,

    // UI state
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, db: Database, catalog: Catalog) -> Result<Self> {
        let mut session = db.load_session()?;
        if let Some(ref mut s) = session {
            s.touch(Utc::now());
            db.touch_session(s.last_active)?;
            info!(user = s.user_label(), "Restored session");
        }

        let theme_mode = db
            .get_setting(SETTING_THEME)?
            .and_then(|v| ThemeMode::from_str(&v))
            .unwrap_or(config.farm.theme);
        let language = db
            .get_setting(SETTING_LANGUAGE)?
            .and_then(|v| Language::from_code(&v))
            .unwrap_or(config.farm.language);

        let cart = Cart::from_lines(db.get_cart()?);
        let farm_crops = db.get_farm_crops()?;
        let chat_history = db.recent_chat_messages(CHAT_HISTORY)?;

        let chat_bot = match config.monitoring.seed {
            Some(seed) => ChatBot::seeded(seed),
            None => ChatBot::new(),
        };

        let screen = if session.is_some() {
            Screen::Dashboard
        } else {
            Screen::Landing
        };

        let seasons = catalog.seasons();
        let states = catalog.states();

        let mut app = Self {
            screen,
            should_quit: false,
            config,
            db,
            catalog,
            session,
            language,
            theme_mode,
            sidebar_visible: true,
            sensors: None,
            monitoring: None,
            forecast: Vec::new(),
            cart,
            farm_crops,
            soil_health: analytics::soil_health_series(),
            water_usage: analytics::water_usage_series(),
            seasons,
            states,
            login_state: LoginState::new(),
            dashboard_state: DashboardState::new(),
            crops_state: CropsState::new(),
            chat_state: ChatState::new(chat_history),
            shop_state: ShopState::new(),
            calculator_state: CalculatorState::new(),
            chat_bot,
            status_message: None,
        };
        app.refilter();
        Ok(app)
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        if self.session.is_none() {
            return;
        }
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Logs a failed action and surfaces it in the status bar.
    pub fn report_error(&mut self, action: &str, err: &crate::error::SmartFarmError) {
        warn!(action, error = %err, "Action failed");
        self.set_status(&format!("{} failed: {}", action, err));
    }

    /// True while keystrokes belong to a text field.
    pub fn is_editing(&self) -> bool {
        match self.screen {
            Screen::Landing => self.login_state.modal_open && self.login_state.field.is_text(),
            Screen::Crops => self.crops_state.focus == CropsFocus::Search,
            Screen::Chat => self.chat_state.typing,
            Screen::Calculator => self.calculator_state.typing,
            _ => false,
        }
    }

    pub fn user_label(&self) -> &str {
        self.session.as_ref().map(|s| s.user_label()).unwrap_or("User")
    }

    // Session

    pub fn login(&mut self, session: Session) -> Result<()> {
        self.db.save_session(&session)?;
        tracing::debug!(method = session.method.kind(), "Session saved");
        let welcome = format!("Welcome, {}", session.display_name);
        self.session = Some(session);
        self.login_state.close();
        self.screen = Screen::Dashboard;
        self.set_status(&welcome);
        Ok(())
    }

    /// Submits the login modal using whichever option has focus.
    pub fn submit_login(&mut self) -> Result<()> {
        let session = match self.login_state.field {
            LoginField::Email | LoginField::Password => {
                auth::login_with_email(&self.login_state.email, &self.login_state.password)?
            }
            LoginField::Phone => auth::login_with_phone(&self.login_state.phone)?,
            LoginField::Google => auth::login_with_google(),
        };
        self.login(session)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.db.clear_session()?;
        info!("Logged out");
        self.session = None;
        self.login_state.close();
        self.screen = Screen::Landing;
        self.clear_status();
        Ok(())
    }

    // Preferences

    pub fn toggle_theme(&mut self) -> Result<()> {
        self.theme_mode = self.theme_mode.toggled();
        self.db.set_setting(SETTING_THEME, self.theme_mode.as_str())
    }

    pub fn cycle_language(&mut self) -> Result<()> {
        self.language = self.language.next();
        self.db.set_setting(SETTING_LANGUAGE, self.language.code())?;
        self.set_status(&format!("Language: {}", self.language.label()));
        Ok(())
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
    }

    // Monitoring

    pub fn apply_update(&mut self, update: MonitorUpdate) {
        match update {
            MonitorUpdate::Sensors(reading) => self.sensors = Some(reading),
            MonitorUpdate::Monitoring(snapshot) => self.monitoring = Some(snapshot),
        }
    }

    pub fn set_forecast(&mut self, forecast: Vec<WeatherDay>) {
        self.forecast = forecast;
    }

    // Crops

    /// Re-runs the catalog filter and replaces the visible list.
    pub fn refilter(&mut self) {
        let criteria = self.crops_state.criteria(&self.seasons, &self.states);
        self.crops_state.matches = self
            .catalog
            .filter(&criteria)
            .into_iter()
            .map(|r| r.id)
            .collect();
        if self.crops_state.selected_index >= self.crops_state.matches.len() {
            self.crops_state.selected_index = self.crops_state.matches.len().saturating_sub(1);
        }
    }

    pub fn visible_crops(&self) -> Vec<&CropRecord> {
        self.crops_state
            .matches
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    pub fn selected_crop(&self) -> Option<&CropRecord> {
        self.crops_state
            .matches
            .get(self.crops_state.selected_index)
            .and_then(|id| self.catalog.get(*id))
    }

    pub fn season_label(&self) -> String {
        match self.crops_state.season_idx.checked_sub(1) {
            Some(i) => self
                .seasons
                .get(i)
                .map(|s| s.label())
                .unwrap_or_else(|| "All Seasons".into()),
            None => "All Seasons".into(),
        }
    }

    pub fn state_label(&self) -> String {
        match self.crops_state.state_idx.checked_sub(1) {
            Some(i) => self
                .states
                .get(i)
                .map(|s| crate::models::region_label(s))
                .unwrap_or_else(|| "All States".into()),
            None => "All States".into(),
        }
    }

    pub fn cycle_season(&mut self, forward: bool) {
        self.crops_state.season_idx =
            cycle_index(self.crops_state.season_idx, self.seasons.len() + 1, forward);
        self.refilter();
    }

    pub fn cycle_state(&mut self, forward: bool) {
        self.crops_state.state_idx =
            cycle_index(self.crops_state.state_idx, self.states.len() + 1, forward);
        self.refilter();
    }

    // My Farm

    pub fn add_selected_to_farm(&mut self) -> Result<()> {
        let Some((id, name)) = self
            .selected_crop()
            .map(|c| (c.id, c.display_name(self.language).to_string()))
        else {
            return Ok(());
        };

        if self.db.add_farm_crop(id)? {
            self.farm_crops.push(id);
            self.set_status(&format!("Added {} to My Farm", name));
        } else {
            self.set_status(&format!("{} is already on your farm", name));
        }
        Ok(())
    }

    pub fn farm_crop_records(&self) -> Vec<&CropRecord> {
        self.farm_crops
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    pub fn remove_selected_farm_crop(&mut self) -> Result<()> {
        let idx = self.dashboard_state.selected_crop;
        let Some(&id) = self.farm_crops.get(idx) else {
            return Ok(());
        };
        self.db.remove_farm_crop(id)?;
        self.farm_crops.remove(idx);
        if self.dashboard_state.selected_crop >= self.farm_crops.len() {
            self.dashboard_state.selected_crop = self.farm_crops.len().saturating_sub(1);
        }
        Ok(())
    }

    // Shop

    // Cart changes are staged on a copy and only kept once persisted.

    pub fn add_to_cart(&mut self, product_id: u32) -> Result<()> {
        let mut staged = self.cart.clone();
        let line = staged.add(product_id)?;
        let (quantity, name) = (
            line.quantity,
            line.product().map(|p| p.name).unwrap_or_default(),
        );
        self.db.set_cart_quantity(product_id, quantity)?;
        self.cart = staged;
        self.set_status(&format!("Added {} to cart", name));
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: u32) -> Result<()> {
        let mut staged = self.cart.clone();
        let remaining = staged.remove_one(product_id)?;
        self.db.set_cart_quantity(product_id, remaining)?;
        self.cart = staged;
        Ok(())
    }

    pub fn clear_cart(&mut self) -> Result<()> {
        self.db.clear_cart()?;
        self.cart.clear();
        self.set_status("Cart cleared");
        Ok(())
    }

    pub fn selected_product_id(&self) -> Option<u32> {
        PRODUCTS.get(self.shop_state.selected_index).map(|p| p.id)
    }

    // Chat

    pub fn send_chat(&mut self, now: Instant) -> Result<()> {
        let text = std::mem::take(&mut self.chat_state.input);
        if let Some(message) = self.chat_bot.submit(&text, now) {
            self.db.save_chat_message(&message)?;
            self.chat_state.messages.push(message);
        }
        Ok(())
    }

    /// Appends the assistant's reply once it is due.
    pub fn poll_chat(&mut self, now: Instant) -> Result<()> {
        if let Some(reply) = self.chat_bot.poll_reply(now) {
            self.db.save_chat_message(&reply)?;
            self.chat_state.messages.push(reply);
        }
        Ok(())
    }

    // Calculator

    pub fn calculate(&mut self) {
        match ResourceEstimate::parse(&self.calculator_state.area_input) {
            Ok(estimate) => {
                self.calculator_state.result = Some(estimate);
                self.clear_status();
            }
            Err(e) => {
                self.calculator_state.result = None;
                self.set_status(&e.to_string());
            }
        }
    }

    pub fn calculator_crop(&self) -> Option<&CropRecord> {
        self.calculator_state
            .crop_idx
            .and_then(|i| self.catalog.records().get(i))
    }
}

fn cycle_index(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;
    use std::time::Duration;

    fn app() -> App {
        let config = Config {
            monitoring: crate::config::MonitoringConfig {
                seed: Some(7),
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(config, Database::open_in_memory().unwrap(), Catalog::builtin()).unwrap()
    }

    fn logged_in() -> App {
        let mut app = app();
        app.login(auth::login_with_google()).unwrap();
        app
    }

    #[test]
    fn starts_on_landing_without_session() {
        let app = app();
        assert_eq!(app.screen, Screen::Landing);
        assert_eq!(app.crops_state.matches.len(), app.catalog.len());
    }

    #[test]
    fn tabs_are_locked_until_login() {
        let mut app = app();
        app.switch_screen(Screen::Shop);
        assert_eq!(app.screen, Screen::Landing);
    }

    #[test]
    fn login_persists_and_restores_session() {
        let db = Database::open_in_memory().unwrap();
        let mut first = App::new(Config::default(), db.clone(), Catalog::builtin()).unwrap();
        first.login_state.email = "ravi@farm.in".into();
        first.login_state.password = "secret".into();
        first.submit_login().unwrap();
        assert_eq!(first.screen, Screen::Dashboard);
        assert_eq!(first.user_label(), "ravi@farm.in");

        let second = App::new(Config::default(), db, Catalog::builtin()).unwrap();
        assert_eq!(second.screen, Screen::Dashboard);
        assert_eq!(second.session.as_ref().unwrap().display_name, "ravi");
    }

    #[test]
    fn failed_login_keeps_landing_page() {
        let mut app = app();
        app.login_state.open(false);
        app.login_state.email = "ravi@farm.in".into();
        assert!(app.submit_login().is_err());
        assert_eq!(app.screen, Screen::Landing);
        assert!(app.session.is_none());
    }

    #[test]
    fn login_modal_title_toggles() {
        let mut state = LoginState::new();
        state.open(false);
        assert_eq!(state.title(), "Login to SmartFarm");
        state.sign_up = !state.sign_up;
        assert_eq!(state.title(), "Sign Up to SmartFarm");
    }

    #[test]
    fn logout_clears_session() {
        let mut app = logged_in();
        app.logout().unwrap();
        assert_eq!(app.screen, Screen::Landing);
        assert!(app.db.load_session().unwrap().is_none());
    }

    #[test]
    fn theme_and_language_persist() {
        let mut app = logged_in();
        app.toggle_theme().unwrap();
        app.cycle_language().unwrap();
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        assert_eq!(app.language, Language::Hi);

        let reopened = App::new(Config::default(), app.db.clone(), Catalog::builtin()).unwrap();
        assert_eq!(reopened.theme_mode, ThemeMode::Dark);
        assert_eq!(reopened.language, Language::Hi);
    }

    #[test]
    fn season_cycle_filters_list() {
        let mut app = logged_in();
        // Seasons are [Rabi, Kharif, Zaid]; index 2 is Kharif
        app.cycle_season(true);
        app.cycle_season(true);
        assert_eq!(app.season_label(), "Kharif");
        assert!(app
            .visible_crops()
            .iter()
            .all(|c| c.season == Season::Kharif));

        app.cycle_season(false);
        app.cycle_season(false);
        assert_eq!(app.season_label(), "All Seasons");
        assert_eq!(app.visible_crops().len(), app.catalog.len());
    }

    #[test]
    fn search_replaces_matches_and_clamps_selection() {
        let mut app = logged_in();
        app.crops_state.selected_index = 5;
        app.crops_state.search = "गेहूं".into();
        app.refilter();
        assert_eq!(app.crops_state.matches, vec![1]);
        assert_eq!(app.crops_state.selected_index, 0);
        assert_eq!(app.selected_crop().unwrap().name, "Wheat");
    }

    #[test]
    fn add_to_farm_is_idempotent() {
        let mut app = logged_in();
        app.add_selected_to_farm().unwrap();
        app.add_selected_to_farm().unwrap();
        assert_eq!(app.farm_crops, vec![1]);
        assert_eq!(app.farm_crop_records()[0].name, "Wheat");

        app.remove_selected_farm_crop().unwrap();
        assert!(app.farm_crops.is_empty());
        assert!(app.db.get_farm_crops().unwrap().is_empty());
    }

    #[test]
    fn cart_changes_are_persisted() {
        let mut app = logged_in();
        app.add_to_cart(1).unwrap();
        app.add_to_cart(1).unwrap();
        app.add_to_cart(3).unwrap();
        assert_eq!(app.cart.item_count(), 3);
        assert!((app.cart.total() - (2.0 * 29.99 + 19.99)).abs() < 1e-9);

        app.remove_from_cart(1).unwrap();
        let reopened = App::new(Config::default(), app.db.clone(), Catalog::builtin()).unwrap();
        assert_eq!(reopened.cart.quantity_of(1), 1);
        assert_eq!(reopened.cart.quantity_of(3), 1);
    }

    #[test]
    fn unknown_product_is_rejected() {
        let mut app = logged_in();
        assert!(app.add_to_cart(99).is_err());
        assert!(app.cart.is_empty());
    }

    #[test]
    fn chat_reply_arrives_after_delay() {
        let mut app = logged_in();
        let start = Instant::now();
        app.chat_state.input = "When should I water?".into();
        app.send_chat(start).unwrap();
        assert!(app.chat_state.input.is_empty());
        assert_eq!(app.chat_state.messages.len(), 1);

        app.poll_chat(start + Duration::from_millis(500)).unwrap();
        assert_eq!(app.chat_state.messages.len(), 1);

        app.poll_chat(start + Duration::from_secs(1)).unwrap();
        assert_eq!(app.chat_state.messages.len(), 2);
        assert_eq!(app.chat_state.messages[1].sender, Sender::Bot);
        assert_eq!(app.db.recent_chat_messages(10).unwrap().len(), 2);
    }

    #[test]
    fn cart_is_unchanged_when_write_fails() {
        let mut app = logged_in();
        app.add_to_cart(1).unwrap();
        app.db
            .with_conn(|conn| {
                conn.execute("DROP TABLE cart_items", [])?;
                Ok(())
            })
            .unwrap();

        assert!(app.add_to_cart(1).is_err());
        assert_eq!(app.cart.quantity_of(1), 1);
        assert!(app.remove_from_cart(1).is_err());
        assert_eq!(app.cart.quantity_of(1), 1);
        assert!(app.clear_cart().is_err());
        assert_eq!(app.cart.item_count(), 1);
    }

    #[test]
    fn each_chat_message_gets_a_reply() {
        let mut app = logged_in();
        let start = Instant::now();
        app.chat_state.input = "first".into();
        app.send_chat(start).unwrap();
        app.chat_state.input = "second".into();
        app.send_chat(start + Duration::from_millis(500)).unwrap();

        for step in 0..=50 {
            app.poll_chat(start + Duration::from_millis(step * 100)).unwrap();
        }
        assert_eq!(app.chat_state.messages.len(), 4);
        let bot_replies = app
            .chat_state
            .messages
            .iter()
            .filter(|m| m.sender == Sender::Bot)
            .count();
        assert_eq!(bot_replies, 2);
        assert!(!app.chat_bot.is_typing());
    }

    #[test]
    fn calculator_reports_bad_input() {
        let mut app = logged_in();
        app.calculator_state.area_input = "abc".into();
        app.calculate();
        assert!(app.calculator_state.result.is_none());
        assert!(app.status_message.is_some());

        app.calculator_state.area_input = "3".into();
        app.calculate();
        let result = app.calculator_state.result.unwrap();
        assert_eq!(result.water_liters, 3000.0);
        assert_eq!(result.fertilizer_kg, 150.0);
    }

    #[test]
    fn calculator_crop_cycles_back_to_none() {
        let mut state = CalculatorState::new();
        state.cycle_crop(2);
        assert_eq!(state.crop_idx, Some(0));
        state.cycle_crop(2);
        assert_eq!(state.crop_idx, Some(1));
        state.cycle_crop(2);
        assert_eq!(state.crop_idx, None);
    }

    #[test]
    fn editing_blocks_global_keys_only_in_text_fields() {
        let mut app = logged_in();
        app.screen = Screen::Crops;
        app.crops_state.focus = CropsFocus::Search;
        assert!(app.is_editing());
        app.crops_state.focus = CropsFocus::List;
        assert!(!app.is_editing());
    }
}
