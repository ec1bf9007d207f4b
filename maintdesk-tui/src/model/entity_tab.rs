//! Generic tab over one entity's master–detail page

use std::time::Instant;

use tokio::runtime::Handle;

use maintdesk_client::EntityId;
use maintdesk_core::config::ITEMS_PER_PAGE_OPTIONS;
use maintdesk_core::editor::{
    FieldControl, ListView, MasterDetailPage, PageMsg, PageSettings, cycle_choice, parse_input,
    toggle, toggle_reference,
};
use maintdesk_core::services::EntityService;
use maintdesk_core::types::{Entity, FieldKind};

use super::{FormCursor, Tab, TabView};
use crate::backend::EffectRunner;
use crate::message::TabMessage;

pub struct EntityTab<E: Entity> {
    page: MasterDetailPage<E>,
    runner: EffectRunner<E>,
    cursor: FormCursor,
    mounted: bool,
}

impl<E: Entity> EntityTab<E> {
    pub fn new(service: EntityService<E>, settings: PageSettings, runtime: Handle) -> Self {
        Self {
            page: MasterDetailPage::new(settings),
            runner: EffectRunner::new(service, runtime),
            cursor: FormCursor::default(),
            mounted: false,
        }
    }

    fn send(&mut self, msg: PageMsg<E>) {
        let effects = self.page.update(msg);
        self.runner.spawn(effects);
    }

    /// Send `make(id)` for the row under the cursor, if any.
    fn send_for_focused(&mut self, make: fn(EntityId) -> PageMsg<E>) {
        if let Some(id) = self.page.focused_id() {
            self.cursor.leave();
            self.send(make(id));
        }
    }

    fn field_count() -> usize {
        E::schema().fields().len()
    }

    fn focused_kind(&self) -> Option<FieldKind> {
        E::schema().fields().get(self.cursor.field).map(|spec| spec.kind)
    }

    fn focused_control(&self) -> Option<FieldControl<'static>> {
        self.page.controls().into_iter().nth(self.cursor.field)
    }

    fn focused_options_len(&self) -> usize {
        self.focused_control()
            .map_or(0, |control| self.page.options(control.spec.key).len())
    }

    /// Disabled controls re-send their current value so the page reports why.
    fn reject_disabled(&mut self, control: &FieldControl<'static>) -> bool {
        if control.enabled {
            return false;
        }
        self.send(PageMsg::FieldChanged {
            key: control.spec.key.to_string(),
            value: control.value.clone(),
        });
        true
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(control) = self.focused_control() else {
            return;
        };
        if self.reject_disabled(&control) {
            return;
        }
        let mut text = self
            .cursor
            .buffer
            .take()
            .unwrap_or_else(|| control.value.display());
        edit(&mut text);
        match parse_input(&control.spec.kind, &text) {
            Ok(value) => {
                self.cursor.buffer_error = None;
                self.send(PageMsg::FieldChanged {
                    key: control.spec.key.to_string(),
                    value,
                });
            }
            Err(e) => self.cursor.buffer_error = Some(e),
        }
        self.cursor.buffer = Some(text);
    }

    fn toggle_field(&mut self) {
        let Some(control) = self.focused_control() else {
            return;
        };
        if self.reject_disabled(&control) {
            return;
        }
        let value = match control.spec.kind {
            FieldKind::Checkbox => toggle(&control.value),
            FieldKind::Choice(options) => cycle_choice(options, &control.value),
            FieldKind::Select(_) | FieldKind::MultiSelect(_) => {
                let Some(option) = self
                    .page
                    .options(control.spec.key)
                    .get(self.cursor.option)
                    .cloned()
                else {
                    return;
                };
                toggle_reference(&control.value, &option)
            }
            FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::Date => return,
        };
        self.send(PageMsg::FieldChanged {
            key: control.spec.key.to_string(),
            value,
        });
    }

    fn step_items_per_page(&mut self, larger: bool) {
        let current = self.page.pagination().items_per_page();
        let next = if larger {
            ITEMS_PER_PAGE_OPTIONS.iter().copied().find(|&n| n > current)
        } else {
            ITEMS_PER_PAGE_OPTIONS
                .iter()
                .rev()
                .copied()
                .find(|&n| n < current)
        };
        if let Some(n) = next {
            self.send(PageMsg::ItemsPerPageChanged(n));
        }
    }

    fn search_edit(&mut self, edit: impl FnOnce(&mut String)) {
        let mut term = self.page.search().draft().to_string();
        edit(&mut term);
        self.send(PageMsg::SearchTyped {
            term,
            at: Instant::now(),
        });
    }
}

impl<E: Entity> Tab for EntityTab<E> {
    fn title(&self) -> &'static str {
        E::TITLE
    }

    fn mount(&mut self) {
        if !self.mounted {
            self.mounted = true;
            log::debug!("{}: mounting tab", E::COLLECTION);
            self.send(PageMsg::Mount);
        }
    }

    fn dispatch(&mut self, msg: TabMessage) {
        match msg {
            TabMessage::CursorUp => self.page.cursor_up(),
            TabMessage::CursorDown => self.page.cursor_down(),
            TabMessage::Select => self.send_for_focused(PageMsg::RowClicked),
            TabMessage::Edit => self.send_for_focused(PageMsg::EditRequested),
            TabMessage::Delete => self.send_for_focused(PageMsg::DeleteRequested),
            TabMessage::New => {
                self.cursor = FormCursor::default();
                self.send(PageMsg::NewRecord);
            }
            TabMessage::Refresh => self.send(PageMsg::Refresh),

            TabMessage::NextPage => {
                let pagination = self.page.pagination();
                if pagination.has_next() {
                    let page = pagination.current_page() + 1;
                    self.send(PageMsg::PageChanged(page));
                }
            }
            TabMessage::PreviousPage => {
                let pagination = self.page.pagination();
                if pagination.has_previous() {
                    let page = pagination.current_page() - 1;
                    self.send(PageMsg::PageChanged(page));
                }
            }
            TabMessage::MoreRows => self.step_items_per_page(true),
            TabMessage::FewerRows => self.step_items_per_page(false),

            TabMessage::SearchInput(c) => self.search_edit(|term| term.push(c)),
            TabMessage::SearchBackspace => self.search_edit(|term| {
                term.pop();
            }),
            TabMessage::SearchSubmit => self.send(PageMsg::SearchSubmitted),
            TabMessage::SearchClear => {
                self.search_edit(String::clear);
                self.send(PageMsg::SearchSubmitted);
            }

            TabMessage::FieldNext => self.cursor.next(Self::field_count()),
            TabMessage::FieldPrevious => self.cursor.previous(Self::field_count()),
            TabMessage::FieldInput(c) => match self.focused_kind() {
                Some(FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::Date) => {
                    self.edit_text(|text| text.push(c));
                }
                Some(_) if c == ' ' => self.toggle_field(),
                _ => {}
            },
            TabMessage::FieldBackspace => {
                if matches!(
                    self.focused_kind(),
                    Some(FieldKind::Text | FieldKind::TextArea | FieldKind::Number | FieldKind::Date)
                ) {
                    self.edit_text(|text| {
                        text.pop();
                    });
                }
            }
            TabMessage::OptionNext => {
                let len = self.focused_options_len();
                self.cursor.next_option(len);
            }
            TabMessage::OptionPrevious => {
                let len = self.focused_options_len();
                self.cursor.previous_option(len);
            }
            TabMessage::Submit => self.send(PageMsg::Submit),
            TabMessage::Discard => {
                self.cursor.leave();
                self.send(PageMsg::Discard);
            }

            TabMessage::ConfirmDelete => self.send(PageMsg::ConfirmDelete),
            TabMessage::CancelDelete => self.send(PageMsg::CancelDelete),

            TabMessage::DismissNotification => {
                if let Some(id) = self.page.notifications().latest().map(|n| n.id) {
                    self.send(PageMsg::DismissNotification(id));
                }
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        self.send(PageMsg::Tick(now));
    }

    fn drain(&mut self) -> usize {
        let done = self.runner.drain();
        let count = done.len();
        let before = (self.page.mode(), self.page.controller().selection());
        let mut saved = false;
        for msg in done {
            saved |= matches!(msg, PageMsg::Created(Ok(_)) | PageMsg::Updated(Ok(_)));
            self.send(msg);
        }
        if saved || (self.page.mode(), self.page.controller().selection()) != before {
            self.cursor.leave();
        }
        count
    }

    fn view(&self) -> TabView {
        let list = self.page.list();
        let pagination = self.page.pagination();
        let search = self.page.search();
        let controls = self.page.controls();
        let options = controls
            .get(self.cursor.field)
            .map(|control| self.page.options(control.spec.key).to_vec())
            .unwrap_or_default();
        TabView {
            title: E::TITLE,
            columns: ListView::<E>::columns(),
            rows: self.page.rows(),
            loading: list.is_loading(),
            error: list.error().map(str::to_string),
            mode: self.page.mode(),
            selection: self.page.controller().selection(),
            record_label: self.page.controller().form().baseline().label(),
            controls,
            actions: self.page.actions(),
            form_cursor: self.cursor.clone(),
            options,
            links: self.page.page_links(),
            current_page: pagination.current_page(),
            total_pages: pagination.total_pages(),
            total_records: pagination.total_records(),
            items_per_page: pagination.items_per_page(),
            search_draft: search.draft().to_string(),
            search_waiting: search.is_waiting(),
            dialog: self.page.dialog().target().cloned(),
            notifications: self.page.notifications().iter().cloned().collect(),
            busy: self.runner.is_busy(),
        }
    }

    fn has_dialog(&self) -> bool {
        self.page.dialog().is_open()
    }

    fn is_dirty(&self) -> bool {
        self.page.controller().form().is_dirty()
    }
}
