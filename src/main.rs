//! Cricket Arena entry point
//!
//! Handles platform-specific initialization and runs the match loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, MouseEvent};

    use cricket_arena::audio::{AudioManager, SoundEffect};
    use cricket_arena::consts::TICK_MS;
    use cricket_arena::game::{CareerStats, MatchEvent, MatchMode, MatchScreen, Session};
    use cricket_arena::leaderboard::LeaderboardEntry;
    use cricket_arena::renderer::{FrameView, RenderState, build_scene};
    use cricket_arena::sim::{Autopilot, BatShot, FixedStep, SimEvent, Simulator};
    use cricket_arena::wallet::{BrowserProvider, Wallet, short_address};
    use cricket_arena::{Leaderboard, Settings, SimVariant};

    const PLAYER_NAME: &str = "You";
    const TOAST_MS: f64 = 2500.0;

    /// Browser interval driving the physics tick. Cleared on drop.
    struct PhysicsTimer {
        handle: i32,
        _closure: Closure<dyn FnMut()>,
    }

    impl Drop for PhysicsTimer {
        fn drop(&mut self) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(self.handle);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        settings: Settings,
        session: Session,
        screen: Option<MatchScreen>,
        leaderboard: Leaderboard,
        wallet: Wallet,
        audio: AudioManager,
        render_state: Option<RenderState>,
        physics_timer: Option<PhysicsTimer>,
        stepper: FixedStep,
        last_tick: f64,
        autopilot: Option<Autopilot>,
        toast: Option<(String, f64)>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                audio: AudioManager::new(&settings),
                settings,
                session: Session::new(),
                screen: None,
                leaderboard: Leaderboard::seeded(),
                wallet: Wallet::Disconnected,
                render_state: None,
                physics_timer: None,
                stepper: FixedStep::new(),
                last_tick: 0.0,
                autopilot: None,
                toast: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn seed(&self) -> u64 {
            self.settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64)
        }

        fn show_toast(&mut self, message: impl Into<String>) {
            self.toast = Some((message.into(), js_sys::Date::now() + TOAST_MS));
        }

        fn claim_bonus(&mut self) {
            match self.session.claim_bonus() {
                Ok(_) => {
                    self.show_toast("🎉 Welcome Bonus Claimed! You received 20,000 MON tokens")
                }
                Err(e) => self.show_toast(e.to_string()),
            }
        }

        fn start_match(&mut self, mode: MatchMode) {
            self.audio.resume();
            match self.session.start_match(mode) {
                Ok(game) => {
                    let screen = MatchScreen::new(game, &self.settings, self.seed());
                    if let Some(rs) = self.render_state.as_mut() {
                        rs.set_field_size(screen.sim.field_size());
                    }
                    self.screen = Some(screen);
                    self.show_toast(format!("🏏 {} Started! Good luck!", mode.title()));
                }
                Err(e) => self.show_toast(e.to_string()),
            }
        }

        /// Leave the match screen, recording the match if anything happened
        fn back_to_menu(&mut self) {
            self.autopilot = None;
            let Some(screen) = self.screen.take() else {
                return;
            };
            let state = &screen.game.state;
            if state.balls + state.wickets == 0 {
                return;
            }
            self.session.finish_match(&screen.game);

            let stats = CareerStats::from_records(&self.session.history);
            self.leaderboard.entries.retain(|e| e.name != PLAYER_NAME);
            if let Some(rank) = self
                .leaderboard
                .add_entry(LeaderboardEntry::from_stats(PLAYER_NAME, &stats))
            {
                self.show_toast(format!("🏆 You're #{rank} on the leaderboard!"));
            }
        }

        fn needs_ticks(&self) -> bool {
            let Some(screen) = &self.screen else {
                return false;
            };
            screen.needs_ticks() || (self.autopilot.is_some() && screen.game.state.game_active)
        }

        /// One fixed step of the match plus its side effects
        fn physics_step(&mut self) {
            let Some(screen) = self.screen.as_mut() else {
                return;
            };
            if let Some(pilot) = self.autopilot.as_mut() {
                let input = pilot.input(&screen.sim);
                if !input.is_empty() {
                    screen.queue(input);
                }
            }

            let outcome = screen.tick(&mut self.session);
            let mut toasts = Vec::new();
            for event in &outcome.sim {
                if let Some(sound) = SoundEffect::for_sim_event(event) {
                    self.audio.play(sound);
                }
                if let SimEvent::ShotPlayed { quality } = event {
                    toasts.push(quality.message().to_string());
                }
            }
            for event in &outcome.game {
                if let Some(sound) = SoundEffect::for_match_event(event) {
                    self.audio.play(sound);
                }
                match event {
                    MatchEvent::Scored { runs, tokens } if runs.is_boundary() => {
                        toasts.push(format!("{runs} runs! +{tokens} tokens"));
                    }
                    MatchEvent::Wicket { fielder, .. } => {
                        toasts.push(format!("🏏 CAUGHT OUT! {fielder} took a brilliant catch!"));
                    }
                    MatchEvent::MatchWon { .. } => toasts.push("🎉 Match Won!".to_string()),
                    MatchEvent::AchievementUnlocked(a) => {
                        toasts.push(format!("🏅 {}: {}", a.title(), a.description()));
                    }
                    _ => {}
                }
            }
            if let Some(last) = toasts.pop() {
                self.show_toast(last);
            }
        }

        fn update_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let (Some(render_state), Some(screen)) = (self.render_state.as_mut(), &self.screen)
            else {
                return;
            };
            let vertices = build_scene(&FrameView {
                sim: &screen.sim,
                effects: &screen.effects,
            });
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update DOM elements from state
        fn update_hud(&mut self, document: &Document) {
            let in_match = self.screen.is_some();
            show(document, "menu", !in_match);
            show(document, "match", in_match);
            set_text(document, "total-tokens", &self.session.total_tokens.to_string());
            show(document, "claim-btn", !self.session.bonus_claimed);
            show(document, "hud-fps", self.settings.show_fps);
            set_text(document, "fps", &self.fps.to_string());

            match &self.wallet {
                Wallet::Connected {
                    address,
                    balance_eth,
                } => set_text(
                    document,
                    "wallet-status",
                    &format!("{} · {} ETH", short_address(address), balance_eth),
                ),
                Wallet::Disconnected => set_text(document, "wallet-status", "Not connected"),
            }

            let now = js_sys::Date::now();
            if self.toast.as_ref().is_some_and(|(_, until)| now > *until) {
                self.toast = None;
            }
            let toast = self.toast.as_ref().map(|(m, _)| m.as_str()).unwrap_or("");
            set_text(document, "toast", toast);
            show(document, "toast", !toast.is_empty());

            if let Some(screen) = &self.screen {
                let board = screen.game.scoreboard();
                set_text(document, "match-title", screen.game.mode.title());
                set_text(document, "score", &board.score);
                set_text(document, "overs", &format!("{} overs", board.overs));
                set_text(document, "rate-label", board.rate_label);
                set_text(document, "rate-value", &board.rate_value);
                set_text(document, "rate-detail", &board.rate_detail);
                set_text(document, "match-tokens", &board.match_tokens.to_string());
                set_text(document, "strike-rate", &board.strike_rate);
                set_text(
                    document,
                    "boundaries",
                    &format!(
                        "4s: {} | 6s: {}",
                        screen.game.state.boundaries.fours, screen.game.state.boundaries.sixes
                    ),
                );
                let achievements: String = screen
                    .game
                    .state
                    .achievements
                    .iter()
                    .map(|a| {
                        format!("<span title=\"{}\">{}</span> ", a.description(), a.title())
                    })
                    .collect();
                if achievements.is_empty() {
                    set_text(document, "achievements", "none yet");
                } else {
                    set_html(document, "achievements", &achievements);
                }

                let over: String = (0..6)
                    .map(|i| match board.this_over.get(i) {
                        Some(r) => format!("<span class=\"ball r{r}\">{r}</span>"),
                        None => "<span class=\"ball\"></span>".to_string(),
                    })
                    .collect();
                set_html(document, "this-over", &over);

                let interactive = screen.sim.variant() == SimVariant::Interactive;
                show(document, "simple-controls", !interactive);
                show(document, "interactive-controls", interactive);
                show(document, "commentary", self.settings.commentary);
                let lines: String = screen
                    .commentary
                    .lines()
                    .map(|l| format!("<li>{l}</li>"))
                    .collect();
                set_html(document, "commentary-lines", &lines);
                set_text(
                    document,
                    "commentary-mute",
                    if screen.commentary.is_muted() { "🔇" } else { "🔊" },
                );
                show(document, "commentary-lines", !screen.commentary.is_muted());
                show(document, "all-out", !screen.game.state.game_active);
            } else {
                let stats = CareerStats::from_records(&self.session.history);
                set_text(
                    document,
                    "career",
                    &format!(
                        "{} matches · {} runs · avg {:.1} · best {} · SR {:.1} · win {:.0}%",
                        stats.matches,
                        stats.total_runs,
                        stats.average_score(),
                        stats.highest_score,
                        stats.strike_rate(),
                        stats.win_rate()
                    ),
                );
                let rows: String = self
                    .leaderboard
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        format!(
                            "<tr><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>",
                            i + 1,
                            e.name,
                            e.tokens,
                            e.runs,
                            e.win_rate
                        )
                    })
                    .collect();
                set_html(document, "leaderboard-rows", &rows);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_html(document: &Document, id: &str, html: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_inner_html(html);
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn input_value(document: &Document, id: &str) -> Option<f32> {
        document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()?
            .value()
            .parse()
            .ok()
    }

    /// Start the physics interval if something needs ticking and it isn't running
    fn ensure_physics_timer(game: &Rc<RefCell<Game>>) {
        {
            let g = game.borrow();
            if g.physics_timer.is_some() || !g.needs_ticks() {
                return;
            }
        }
        let Some(window) = web_sys::window() else {
            return;
        };

        let tick_game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || physics_tick(&tick_game));
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TICK_MS as i32,
        ) {
            Ok(handle) => {
                let mut g = game.borrow_mut();
                g.stepper.reset();
                g.last_tick = js_sys::Date::now();
                g.physics_timer = Some(PhysicsTimer {
                    handle,
                    _closure: closure,
                });
            }
            Err(e) => log::error!("Failed to start physics timer: {:?}", e),
        }
    }

    fn physics_tick(game: &Rc<RefCell<Game>>) {
        let finished = {
            let mut g = game.borrow_mut();
            // Throttled intervals fire late; catch up in whole ticks
            let now = js_sys::Date::now();
            let steps = g.stepper.advance(now - g.last_tick);
            g.last_tick = now;
            for _ in 0..steps {
                g.physics_step();
            }
            if g.needs_ticks() {
                None
            } else {
                g.physics_timer.take()
            }
        };
        // The closure cannot be dropped while it is running
        if let Some(timer) = finished {
            wasm_bindgen_futures::spawn_local(async move { drop(timer) });
        }
    }

    /// Run a match-screen action, then make sure the physics timer is running
    fn on_click(
        document: &Document,
        id: &str,
        game: &Rc<RefCell<Game>>,
        action: impl Fn(&mut Game, &Document) + 'static,
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing element #{id}");
            return;
        };
        let game = game.clone();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut(), &doc);
            ensure_physics_timer(&game);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn each_with_attr(document: &Document, attr: &str) -> Vec<(Element, String)> {
        let Ok(nodes) = document.query_selector_all(&format!("[{attr}]")) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .filter_map(|el| el.get_attribute(attr).map(|v| (el, v)))
            .collect()
    }

    fn setup_menu(document: &Document, game: &Rc<RefCell<Game>>) {
        on_click(document, "claim-btn", game, |g, _| g.claim_bonus());

        for (el, value) in each_with_attr(document, "data-mode") {
            let Some(mode) = MatchMode::from_str(&value) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start_match(mode);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        on_click(document, "wallet-btn", game, |g, _| {
            if g.wallet.is_connected() {
                g.wallet.disconnect();
                return;
            }
            let provider = BrowserProvider::detect();
            if provider.is_none() {
                g.show_toast("MetaMask Not Found. Please install MetaMask to connect your wallet");
                return;
            }
            spawn_wallet_connect(provider);
        });
    }

    // Wallet results arrive asynchronously; they are stored through this
    // handle once the game exists.
    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    fn spawn_wallet_connect(provider: Option<BrowserProvider>) {
        wasm_bindgen_futures::spawn_local(async move {
            let result = Wallet::connect(provider.as_ref()).await;
            GAME.with(|slot| {
                let Some(game) = slot.borrow().clone() else {
                    return;
                };
                let mut g = game.borrow_mut();
                match result {
                    Ok(wallet) => {
                        if let Some(address) = wallet.address() {
                            let short = short_address(address);
                            g.show_toast(format!("🎉 Wallet Connected! {short}"));
                        }
                        g.wallet = wallet;
                    }
                    Err(e) => g.show_toast(format!("Connection Failed: {e}")),
                }
            });
        });
    }

    fn setup_match_controls(document: &Document, game: &Rc<RefCell<Game>>) {
        on_click(document, "back-btn", game, |g, _| g.back_to_menu());
        on_click(document, "reset-btn", game, |g, _| {
            g.autopilot = None;
            if let Some(screen) = g.screen.as_mut() {
                screen.reset();
            }
        });
        on_click(document, "autoplay-btn", game, |g, _| {
            g.autopilot = match g.autopilot {
                Some(_) => None,
                None => Some(Autopilot::new(g.seed())),
            };
            log::info!("Autoplay: {}", g.autopilot.is_some());
        });
        on_click(document, "commentary-mute", game, |g, _| {
            if let Some(screen) = g.screen.as_mut() {
                screen.commentary.toggle_mute();
            }
        });

        // Simple field
        for (el, value) in each_with_attr(document, "data-shot") {
            let shot = match value.as_str() {
                "defensive" => BatShot::Defensive,
                "drive" => BatShot::Drive,
                "big-hit" => BatShot::BigHit,
                _ => continue,
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(screen) = game.borrow_mut().screen.as_mut() {
                    screen.bat(shot);
                }
                ensure_physics_timer(&game);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = document.get_element_by_id("bat-slider") {
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(x) = input_value(&doc, "bat-slider") else {
                    return;
                };
                if let Some(screen) = game.borrow_mut().screen.as_mut() {
                    screen.set_bat_position(x);
                }
                ensure_physics_timer(&game);
            });
            let _ =
                slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Interactive field
        on_click(document, "deliver-btn", game, |g, _| {
            if let Some(screen) = g.screen.as_mut() {
                screen.deliver();
            }
        });
        on_click(document, "shot-btn", game, |g, doc| {
            let timing = input_value(doc, "timing-slider").unwrap_or(50.0);
            let power = input_value(doc, "power-slider").unwrap_or(50.0);
            if let Some(screen) = g.screen.as_mut() {
                screen.play_shot(timing, power);
            }
        });
    }

    fn setup_keyboard(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            {
                let mut g = game.borrow_mut();
                let Some(screen) = g.screen.as_mut() else {
                    return;
                };
                match event.key().as_str() {
                    " " => screen.deliver(),
                    "1" => screen.bat(BatShot::Defensive),
                    "2" => screen.bat(BatShot::Drive),
                    "3" => screen.bat(BatShot::BigHit),
                    _ => return,
                }
            }
            ensure_physics_timer(&game);
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(document: &Document, game: &Rc<RefCell<Game>>) {
        let game = game.clone();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.autopilot.take().is_some() {
                    log::info!("Autoplay stopped (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, document: Document) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(game, document, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Render loop: reads state, never advances physics
    fn frame(game: Rc<RefCell<Game>>, document: Document, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update_fps(time);
            g.render();
            g.update_hud(&document);
        }
        request_animation_frame(game, document);
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        field: glam::Vec2,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| log::error!("Failed to create surface: {e}"))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("Failed to get adapter: {e}"))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, field)
            .await
            .map_err(|e| log::error!("Failed to create device: {e}"))
            .ok()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Cricket Arena starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        show(&document, "loading", false);

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(settings)));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        if let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            let dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            let field = Simulator::new(game.borrow().settings.variant, 0).field_size();
            let render_state = init_renderer(canvas, width, height, field).await;
            game.borrow_mut().render_state = render_state;
        } else {
            log::warn!("No canvas, running without a field view");
        }

        setup_menu(&document, &game);
        setup_match_controls(&document, &game);
        setup_keyboard(&game);
        setup_auto_pause(&document, &game);

        // Silent reconnect if the page is already authorised
        {
            let provider = BrowserProvider::detect();
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let wallet = Wallet::check_existing(provider.as_ref()).await;
                game.borrow_mut().wallet = wallet;
            });
        }

        request_animation_frame(game, document);

        log::info!("Cricket Arena running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cricket_arena::game::{MatchMode, MatchScreen, Session};
    use cricket_arena::sim::Autopilot;
    use cricket_arena::{Leaderboard, Settings};

    env_logger::init();
    log::info!("Cricket Arena (native) starting...");
    log::info!("Playing one autoplay innings headlessly; `trunk serve` runs the web version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(42);
    let mut session = Session::new();
    if let Err(e) = session.claim_bonus() {
        log::error!("{e}");
        return;
    }
    let game = match session.start_match(MatchMode::Career) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    let mut screen = MatchScreen::new(game, &settings, seed);
    let mut pilot = Autopilot::new(seed);
    // Innings ends all out or after 20 overs
    const MAX_BALLS: u32 = 120;
    const MAX_TICKS: u32 = 2_000_000;

    for _ in 0..MAX_TICKS {
        let state = &screen.game.state;
        if !state.game_active || state.balls >= MAX_BALLS {
            break;
        }
        let input = pilot.input(&screen.sim);
        screen.queue(input);
        let outcome = screen.tick(&mut session);
        if !outcome.game.is_empty()
            && let Some(line) = screen.commentary.latest()
        {
            log::debug!("{line}");
        }
    }

    let record = session.finish_match(&screen.game).clone();
    println!("{} ({} field)", screen.game.mode.title(), settings.variant.as_str());
    let summary = screen.game.scoreboard().summary();
    log::info!("Innings over: {summary}");
    println!("{summary}");
    println!("Session tokens: {}", session.total_tokens);
    match serde_json::to_string(&record) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize match record: {e}"),
    }

    let board = Leaderboard::seeded();
    match board.potential_rank(session.total_tokens) {
        Some(rank) => println!("Leaderboard rank: #{rank}"),
        None => println!("Outside the top {}", board.entries.len()),
    }
    if let Some(top) = board.leader() {
        println!("Leader: {} with {} tokens", top.name, top.tokens);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
