//! Application event loop.
//!
//! The loop owns the GPU [`Context`] and the [`ViewerState`]. Everything that
//! happens elsewhere (model loads finishing, DOM hover events, window focus on
//! the web) arrives as a [`FlowEvent`] through the event loop proxy, so all
//! state is mutated on the event loop thread.
//!
//! Each frame:
//! 1. update the viewer state (skipped while unfocused)
//! 2. write region instances and the camera uniform
//! 3. shadow pass, main pass, present
//! 4. request the next redraw

use std::{fmt::Debug, sync::Arc};

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    config::ViewerConfig,
    context::Context,
    data_structures::{
        instance::Instance,
        model::{RegionGeometry, RegionMesh},
    },
    hover::{HoverEvent, ListCursor},
    registry::{RegionRegistry, RegionSlots},
    render,
    resources,
    state::ViewerState,
    stats::{FrameStats, StatsOverlay},
};

/// State-mutation requests sent to the event loop.
#[derive(Debug)]
pub enum ViewerEvent {
    Hover(HoverEvent),
    Focus(bool),
    RegionLoaded {
        index: usize,
        geometry: RegionGeometry,
    },
    RegionFailed {
        index: usize,
        error: String,
    },
}

pub(crate) enum FlowEvent {
    /// The asynchronously created app state (web only).
    #[allow(dead_code)]
    Initialized(Box<AppState>),
    Viewer(ViewerEvent),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::Viewer(event) => f.debug_tuple("Viewer").field(event).finish(),
        }
    }
}

/// Viewer events that arrive before the app state exists, replayed in
/// arrival order once it does.
#[derive(Debug, Default)]
pub struct EventBacklog {
    events: Vec<ViewerEvent>,
}

impl EventBacklog {
    pub fn push(&mut self, event: ViewerEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hands every buffered event to `apply`, oldest first, and empties the
    /// backlog.
    pub fn replay(&mut self, mut apply: impl FnMut(ViewerEvent)) {
        for event in self.events.drain(..) {
            apply(event);
        }
    }
}

/// GPU context plus everything drawn with it.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    viewer: ViewerState,
    meshes: RegionSlots<RegionMesh>,
    stats: FrameStats,
    overlay: StatsOverlay,
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    cursor: ListCursor,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &ViewerConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;
        let registry = RegionRegistry::new(config.regions.iter().cloned());
        let meshes = RegionSlots::new(registry.len());
        Ok(Self {
            ctx,
            viewer: ViewerState::new(registry, config.palette.clone()),
            meshes,
            stats: FrameStats::new(Instant::now()),
            overlay: StatsOverlay::new(&config.stats_element_id, &config.title),
            cursor: ListCursor::new(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.is_surface_configured = true;
        }
    }

    fn on_viewer_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::Hover(hover) => {
                self.viewer.on_hover(&hover);
            }
            ViewerEvent::Focus(focused) => {
                if focused && !self.viewer.is_running() {
                    self.stats.reset(Instant::now());
                }
                self.viewer.set_focus(focused);
            }
            ViewerEvent::RegionLoaded { index, geometry } => {
                let name = self.viewer.registry.name(index).unwrap_or("?").to_string();
                if self.viewer.region_loaded(index, geometry.framing_bounds()) {
                    let mesh = RegionMesh::new(
                        &self.ctx.device,
                        &name,
                        &geometry,
                        self.viewer.palette.rest,
                    );
                    self.meshes.insert(index, mesh);
                    log::info!("{} ready", name);
                }
                self.log_progress();
            }
            ViewerEvent::RegionFailed { index, error } => {
                let name = self.viewer.registry.name(index).unwrap_or("?");
                log::error!("{} failed to load: {}", name, error);
                self.viewer.region_failed(index);
                self.meshes.mark_failed(index);
                self.log_progress();
            }
        }
    }

    fn log_progress(&self) {
        if self.viewer.regions.is_settled() {
            log::info!(
                "{}/{} regions loaded",
                self.viewer.regions.loaded_count(),
                self.viewer.regions.len()
            );
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn on_key(&mut self, key: &winit::keyboard::Key) {
        use winit::keyboard::{Key, NamedKey};

        let event = match key {
            Key::Named(NamedKey::ArrowDown) => self.cursor.next(&self.viewer.registry),
            Key::Named(NamedKey::ArrowUp) => self.cursor.prev(&self.viewer.registry),
            Key::Named(NamedKey::Escape) => Some(self.cursor.leave()),
            _ => None,
        };
        if let Some(event) = event {
            self.on_viewer_event(ViewerEvent::Hover(event));
        }
    }

    fn update(&mut self) {
        if self.viewer.update(self.ctx.projection.fovy()) {
            if let Some(fps) = self.stats.frame(Instant::now()) {
                self.overlay.show(&self.ctx.window, fps);
            }
        }

        for (index, region) in self.viewer.regions.loaded() {
            if let Some(mesh) = self.meshes.get(index) {
                let instance = Instance::lifted(region.anim.offset, region.anim.color);
                mesh.write_instance(&self.ctx.queue, &instance);
            }
        }

        self.ctx.camera.camera.eye = self.viewer.rig.eye();
        self.ctx.camera.camera.target = self.viewer.rig.target();
        self.ctx
            .camera
            .write_to_buffer(&self.ctx.queue, &self.ctx.projection);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.update();
        render::render_frame(&self.ctx, &self.meshes)
    }
}

pub(crate) struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent>,
    config: ViewerConfig,
    state: Option<AppState>,
    backlog: EventBacklog,
    initializing: bool,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: ViewerConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            state: None,
            backlog: EventBacklog::default(),
            initializing: false,
            failure: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("App initialization failed: {:#}", error);
        self.failure = Some(error);
        event_loop.exit();
    }

    fn window_attributes(&self) -> anyhow::Result<winit::window::WindowAttributes> {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(&self.config.title);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = crate::web::canvas(&self.config.canvas_id)?;
            window_attributes = window_attributes.with_canvas(Some(canvas));
        }

        Ok(window_attributes)
    }

    /// Starts one independent load per region. Results come back as
    /// [`ViewerEvent`]s in whatever order they finish.
    fn spawn_loads(&self) {
        for (index, name) in self.config.regions.iter().enumerate() {
            let path = self.config.asset_path(name);
            let name = name.clone();
            let proxy = self.proxy.clone();
            let load = async move {
                let event = match resources::load_region(&path, &name).await {
                    Ok(geometry) => ViewerEvent::RegionLoaded { index, geometry },
                    Err(error) => ViewerEvent::RegionFailed {
                        index,
                        error: format!("{:#}", error),
                    },
                };
                if proxy.send_event(FlowEvent::Viewer(event)).is_err() {
                    log::warn!("event loop closed before {} finished loading", name);
                }
            };

            #[cfg(not(target_arch = "wasm32"))]
            self.async_runtime.spawn(load);

            #[cfg(target_arch = "wasm32")]
            wasm_bindgen_futures::spawn_local(load);
        }
    }

    fn start(&mut self, mut app_state: AppState) {
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);
        app_state.ctx.window.request_redraw();
        if !self.backlog.is_empty() {
            log::debug!("replaying {} early events", self.backlog.len());
        }
        self.backlog.replay(|event| app_state.on_viewer_event(event));
        self.state = Some(app_state);
        self.spawn_loads();
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.initializing {
            return;
        }
        self.initializing = true;

        let window = match self
            .window_attributes()
            .and_then(|attributes| Ok(event_loop.create_window(attributes)?))
        {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e),
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let init = self
                .async_runtime
                .block_on(AppState::new(window, &self.config));
            match init {
                Ok(app_state) => self.start(app_state),
                Err(e) => self.fail(event_loop, e),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            if let Err(e) = crate::web::attach_listeners(&self.config, self.proxy.clone()) {
                log::warn!("hover list unavailable: {:#}", e);
            }
            let proxy = self.proxy.clone();
            let config = self.config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match AppState::new(window, &config).await {
                    Ok(app_state) => {
                        if proxy
                            .send_event(FlowEvent::Initialized(Box::new(app_state)))
                            .is_err()
                        {
                            log::error!("event loop closed during initialization");
                        }
                    }
                    Err(e) => log::error!("App initialization failed: {:#}", e),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(app_state) => {
                // This is the message from our wasm `spawn_local`
                self.start(*app_state);
            }
            FlowEvent::Viewer(event) => match &mut self.state {
                Some(state) => state.on_viewer_event(event),
                None => self.backlog.push(event),
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            // On the web, focus follows the browser window (see `web`), not the canvas.
            #[cfg(not(target_arch = "wasm32"))]
            WindowEvent::Focused(focused) => state.on_viewer_event(ViewerEvent::Focus(focused)),
            #[cfg(not(target_arch = "wasm32"))]
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                state.on_key(&event.logical_key)
            }
            WindowEvent::RedrawRequested => match state.render() {
                Ok(_) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = state.ctx.window.inner_size();
                    state.resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

/// Opens the viewer and runs it until the window closes.
///
/// On the web this returns immediately and the browser drives the loop.
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info)?;
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    #[allow(unused_mut)]
    let mut app = App::new(&event_loop, config)?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        event_loop.run_app(&mut app)?;
        match app.failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;

        event_loop.spawn_app(app);
        Ok(())
    }
}
