//! Main application state

use tokio::runtime::Handle;

use maintdesk_core::ServiceContext;
use maintdesk_core::editor::PageSettings;
use maintdesk_core::types::{
    Client, Employee, Entity, MachineEntry, Product, ServiceEngineer, ServiceEntry,
    ServiceRequest, Spare, Vendor,
};

use super::{EntityTab, FocusPanel, Tab};

/// Main application state
pub struct App {
    /// Whether the main loop should exit
    pub should_quit: bool,

    /// Focused panel of the active tab
    pub focus: FocusPanel,

    /// One tab per entity, in menu order
    pub tabs: Vec<Box<dyn Tab>>,

    /// Index of the active tab
    pub active: usize,

    pub show_help: bool,

    /// Whether a bearer token was found at startup
    pub signed_in: bool,

    pub base_url: String,
}

fn entity_tab<E: Entity>(
    ctx: &ServiceContext,
    settings: PageSettings,
    runtime: &Handle,
) -> Box<dyn Tab> {
    Box::new(EntityTab::<E>::new(
        ctx.entity_service::<E>(),
        settings,
        runtime.clone(),
    ))
}

impl App {
    pub fn new(ctx: &ServiceContext, runtime: &Handle) -> Self {
        let settings = PageSettings::from(&ctx.config);
        let tabs = vec![
            entity_tab::<Client>(ctx, settings, runtime),
            entity_tab::<Vendor>(ctx, settings, runtime),
            entity_tab::<Product>(ctx, settings, runtime),
            entity_tab::<Spare>(ctx, settings, runtime),
            entity_tab::<ServiceEngineer>(ctx, settings, runtime),
            entity_tab::<Employee>(ctx, settings, runtime),
            entity_tab::<MachineEntry>(ctx, settings, runtime),
            entity_tab::<ServiceRequest>(ctx, settings, runtime),
            entity_tab::<ServiceEntry>(ctx, settings, runtime),
        ];
        Self::with_tabs(tabs, ctx.is_authenticated(), ctx.config.base_url.clone())
    }

    /// Build from ready tabs and mount the first one.
    pub fn with_tabs(tabs: Vec<Box<dyn Tab>>, signed_in: bool, base_url: String) -> Self {
        let mut app = Self {
            should_quit: false,
            focus: FocusPanel::default(),
            tabs,
            active: 0,
            show_help: false,
            signed_in,
            base_url,
        };
        if let Some(tab) = app.tabs.first_mut() {
            tab.mount();
        }
        app
    }

    pub fn active_tab(&self) -> Option<&dyn Tab> {
        self.tabs.get(self.active).map(AsRef::as_ref)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut (dyn Tab + 'static)> {
        self.tabs.get_mut(self.active).map(AsMut::as_mut)
    }

    /// Switch tabs; the target loads its data on first visit.
    pub fn select_tab(&mut self, index: usize) {
        if index >= self.tabs.len() || index == self.active {
            return;
        }
        self.active = index;
        self.focus = FocusPanel::List;
        self.tabs[index].mount();
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.select_tab((self.active + 1) % self.tabs.len());
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            let len = self.tabs.len();
            self.select_tab((self.active + len - 1) % len);
        }
    }
}
