//! Pagemark - annotated PDF viewer
//!
//! eframe shell around the core crates: sign-in gate, page viewport with
//! click-to-annotate, navigation and zoom controls, persistent session.

use eframe::egui;
use pagemark_core::{
    admin_only, compose_page, place_at, remove_near, AnnotationList, AuthStore, FontRenderer,
    PointerMap, RouteDecision, Surface, TextRasterizer, UserInfo, ViewState, ADMIN_ROLE,
};
use pagemark_render::PdfDocument;
use pagemark_scheduler::{RenderRequest, RenderScheduler};
use pagemark_store::{Store, ANNOTATIONS_KEY, DOCUMENT_KEY, LAST_PAGE_KEY};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;

mod export;
mod toast;

use toast::Toast;

fn init_logging() -> std::io::Result<()> {
    let file = File::create("pagemark.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), file)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(())
}

fn main() -> eframe::Result {
    if let Err(err) = init_logging() {
        eprintln!("logging unavailable: {err}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Pagemark"),
        ..Default::default()
    };

    eframe::run_native(
        "Pagemark",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc)))),
    )
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// Sign-in form
    Auth,
    /// Landing screen for signed-in non-admins
    Home,
    /// The annotated page viewer, admins only
    Viewer,
}

fn route_for(user: Option<&UserInfo>) -> Route {
    match admin_only(user) {
        RouteDecision::Allow => Route::Viewer,
        RouteDecision::RedirectToAuth => Route::Auth,
        RouteDecision::RedirectToHome => Route::Home,
    }
}

struct ViewerApp {
    // Persistence and session
    store: Option<Store>,
    auth: AuthStore,
    route: Route,

    // Document and annotations
    document: Option<PdfDocument>,
    annotations: AnnotationList,
    view: ViewState,

    // Rendering
    surface: Surface,
    font: Option<FontRenderer>,
    scheduler: RenderScheduler,
    texture: Option<egui::TextureHandle>,

    // UI state
    annotation_input: String,
    auth_name: String,
    auth_admin: bool,
    toasts: Vec<Toast>,
}

impl ViewerApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let store = match Store::open_default() {
            Ok(store) => Some(store),
            Err(err) => {
                log::warn!("persistent storage unavailable: {err}");
                None
            }
        };
        let auth = match &store {
            Some(store) => AuthStore::load(store),
            None => AuthStore::signed_out(),
        };
        let route = route_for(auth.current());
        let font = match FontRenderer::load_system() {
            Ok(font) => Some(font),
            Err(err) => {
                log::warn!("annotation font unavailable: {err}");
                None
            }
        };

        let mut app = Self {
            store,
            auth,
            route,
            document: None,
            annotations: AnnotationList::new(),
            view: ViewState::new(),
            surface: Surface::empty(),
            font,
            scheduler: RenderScheduler::new(),
            texture: None,
            annotation_input: String::new(),
            auth_name: String::new(),
            auth_admin: true,
            toasts: Vec::new(),
        };
        if app.route == Route::Viewer {
            app.restore_session();
        }
        app
    }

    fn toast_success(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::success(message));
    }

    fn toast_error(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::error(message));
    }

    /// Restore annotations, the stored document and the last viewed page.
    fn restore_session(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };

        match store.load_json::<AnnotationList>(ANNOTATIONS_KEY) {
            Ok(Some(list)) => self.annotations = list,
            Ok(None) => {}
            Err(err) => log::warn!("failed to restore annotations: {err}"),
        }

        match store.load_bytes(DOCUMENT_KEY) {
            Ok(Some(bytes)) => match PdfDocument::from_bytes(bytes) {
                Ok(document) => {
                    self.view.set_document(document.page_count() as u32);
                    self.document = Some(document);
                }
                Err(err) => {
                    log::error!("stored document could not be opened: {err}");
                    self.toast_error("stored document could not be opened");
                }
            },
            Ok(None) => {}
            Err(err) => log::warn!("failed to restore document: {err}"),
        }

        if self.document.is_some() {
            if let Ok(Some(page)) = store.load_json::<u32>(LAST_PAGE_KEY) {
                self.view.go_to_page(page);
            }
            self.request_render();
        }
    }

    fn request_render(&mut self) {
        self.scheduler.request(RenderRequest {
            page: self.view.current_page,
            zoom: self.view.zoom,
        });
    }

    /// Drain the scheduler: render the latest request, retrying while newer
    /// requests landed during the render.
    fn pump_renders(&mut self, ctx: &egui::Context) {
        let mut rendered = false;
        while let Some(request) = self.scheduler.try_begin() {
            self.render_once(ctx, request);
            rendered = true;
            if !self.scheduler.finish() {
                break;
            }
        }
        if rendered {
            let stats = self.scheduler.stats();
            log::debug!(
                "render pass done: {} requested, {} coalesced, {} completed",
                stats.requested,
                stats.coalesced,
                stats.completed
            );
        }
    }

    fn render_once(&mut self, ctx: &egui::Context, request: RenderRequest) {
        let Some(document) = &self.document else {
            return;
        };
        let raster = self.font.as_ref().map(|f| f as &dyn TextRasterizer);

        match compose_page(
            document,
            request.page,
            request.zoom,
            &self.annotations,
            raster,
            &mut self.surface,
        ) {
            Ok(()) => {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [self.surface.width() as usize, self.surface.height() as usize],
                    self.surface.pixels(),
                );
                match &mut self.texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("page", image, egui::TextureOptions::LINEAR));
                    }
                }
            }
            Err(err) => {
                log::error!("page render failed: {err}");
                self.toast_error(format!("render failed: {err}"));
            }
        }
    }

    fn persist_annotations(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_json(ANNOTATIONS_KEY, &self.annotations) {
                log::warn!("failed to persist annotations: {err}");
            }
        }
    }

    fn persist_page(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_json(LAST_PAGE_KEY, &self.view.current_page) {
                log::warn!("failed to persist last page: {err}");
            }
        }
    }

    fn open_document(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()
        else {
            return;
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.toast_error(format!("could not read file: {err}"));
                return;
            }
        };

        if let Some(store) = &self.store {
            if let Err(err) = store.save_bytes(DOCUMENT_KEY, &bytes) {
                log::warn!("failed to persist document: {err}");
            }
        }

        match PdfDocument::from_bytes(bytes) {
            Ok(document) => {
                self.view.set_document(document.page_count() as u32);
                self.document = Some(document);
                self.persist_page();
                self.request_render();
            }
            Err(err) => {
                log::error!("failed to open {}: {err}", path.display());
                self.toast_error(format!("not a valid PDF: {err}"));
            }
        }
    }

    fn clear_storage(&mut self) {
        let outcome = match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        };
        match outcome {
            Ok(()) => {
                self.document = None;
                self.annotations = AnnotationList::new();
                self.view = ViewState::new();
                self.surface = Surface::empty();
                self.texture = None;
                self.toast_success("stored data cleared");
            }
            Err(err) => self.toast_error(format!("clear failed: {err}")),
        }
    }

    fn save_composed(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("document.png")
            .save_file()
        else {
            return;
        };
        let outcome = export::save_composed(&self.surface, &self.annotations, &path);
        if outcome.success {
            self.toast_success(outcome.message);
        } else {
            self.toast_error(outcome.message);
        }
    }

    fn save_screenshot(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(export::screenshot_file_name(self.view.current_page))
            .save_file()
        else {
            return;
        };
        let outcome = export::save_screenshot(&self.surface, &path);
        if outcome.success {
            self.toast_success(outcome.message);
        } else {
            self.toast_error(outcome.message);
        }
    }

    fn sign_out(&mut self) {
        if let Some(store) = &self.store {
            self.auth.logout(store);
        } else {
            self.auth = AuthStore::signed_out();
        }
        self.route = Route::Auth;
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.route {
            Route::Auth => self.draw_auth(ctx),
            Route::Home => self.draw_home(ctx),
            Route::Viewer => {
                self.pump_renders(ctx);
                self.draw_toolbar(ctx);
                self.draw_controls(ctx);
                self.draw_viewport(ctx);
            }
        }
        toast::draw_toasts(ctx, &mut self.toasts);
    }
}

impl ViewerApp {
    fn draw_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open").clicked() {
                    self.open_document();
                }

                let has_render = !self.surface.is_empty();
                if ui
                    .add_enabled(has_render, egui::Button::new("Save"))
                    .clicked()
                {
                    self.save_composed();
                }
                if ui
                    .add_enabled(has_render, egui::Button::new("Screenshot"))
                    .clicked()
                {
                    self.save_screenshot();
                }

                ui.separator();
                if ui.button("Clear storage").clicked() {
                    self.clear_storage();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Sign out").clicked() {
                        self.sign_out();
                    }
                    if let Some(user) = self.auth.current() {
                        ui.label(format!("Signed in as {}", user.name));
                    }
                });
            });
        });
    }

    fn draw_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let has_document = self.view.has_document();

                if ui
                    .add_enabled(
                        has_document && self.view.current_page > 1,
                        egui::Button::new("\u{25c0} Prev"),
                    )
                    .clicked()
                    && self.view.prev_page()
                {
                    self.persist_page();
                    self.request_render();
                }
                if ui
                    .add_enabled(
                        has_document && self.view.current_page < self.view.page_count,
                        egui::Button::new("Next \u{25b6}"),
                    )
                    .clicked()
                    && self.view.next_page()
                {
                    self.persist_page();
                    self.request_render();
                }

                if has_document {
                    ui.label(format!(
                        "Page {} / {}",
                        self.view.current_page, self.view.page_count
                    ));

                    let mut page = self.view.current_page;
                    ui.add(
                        egui::DragValue::new(&mut page).range(1..=self.view.page_count),
                    );
                    if page != self.view.current_page && self.view.go_to_page(page) {
                        self.persist_page();
                        self.request_render();
                    }
                }

                ui.separator();

                if ui
                    .add_enabled(has_document, egui::Button::new("\u{2212}"))
                    .clicked()
                    && self.view.zoom_out()
                {
                    self.request_render();
                }
                ui.label(format!("{:.0}%", self.view.zoom * 100.0));
                if ui
                    .add_enabled(has_document, egui::Button::new("+"))
                    .clicked()
                    && self.view.zoom_in()
                {
                    self.request_render();
                }

                ui.separator();
                ui.label("Note:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.annotation_input)
                        .hint_text("click the page to place")
                        .desired_width(220.0),
                );
            });
        });
    }

    fn draw_viewport(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.document.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a PDF to get started");
                });
                return;
            }
            let Some(texture) = self.texture.clone() else {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            };

            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    // Display at native pixel scale so the texture stays sharp.
                    let ppp = ui.ctx().pixels_per_point();
                    let size = egui::vec2(
                        self.surface.width() as f32 / ppp,
                        self.surface.height() as f32 / ppp,
                    );

                    let available = ui.available_size();
                    let padding_x = ((available.x - size.x) / 2.0).max(0.0);
                    let padding_y = ((available.y - size.y) / 2.0).max(0.0);

                    ui.add_space(padding_y);
                    ui.horizontal(|ui| {
                        ui.add_space(padding_x);
                        let (rect, response) =
                            ui.allocate_exact_size(size, egui::Sense::click());

                        ui.painter().image(
                            texture.id(),
                            rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );

                        if let Some(pos) = response.interact_pointer_pos() {
                            let local = pos - rect.min;
                            let map = PointerMap::new(
                                self.surface.width(),
                                self.surface.height(),
                                size.x,
                                size.y,
                            );
                            if response.clicked() {
                                self.handle_place(&map, local.x, local.y);
                            } else if response.secondary_clicked() {
                                self.handle_remove(&map, local.x, local.y);
                            }
                        }
                    });
                });
        });
    }

    fn handle_place(&mut self, map: &PointerMap, x: f32, y: f32) {
        let text = self.annotation_input.trim().to_string();
        if text.is_empty() {
            self.toast_error("type a note first");
            return;
        }
        place_at(
            &mut self.annotations,
            map,
            x,
            y,
            &text,
            self.view.current_page,
        );
        self.persist_annotations();
        self.request_render();
    }

    fn handle_remove(&mut self, map: &PointerMap, x: f32, y: f32) {
        if remove_near(&mut self.annotations, map, x, y, self.view.current_page).is_some() {
            self.persist_annotations();
            self.request_render();
        }
    }

    fn draw_auth(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.heading("Sign in");
                ui.add_space(16.0);

                ui.add(
                    egui::TextEdit::singleline(&mut self.auth_name)
                        .hint_text("name")
                        .desired_width(200.0),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add_space((ui.available_width() - 160.0).max(0.0) / 2.0);
                    ui.radio_value(&mut self.auth_admin, true, "admin");
                    ui.radio_value(&mut self.auth_admin, false, "reader");
                });
                ui.add_space(12.0);

                let name = self.auth_name.trim().to_string();
                if ui
                    .add_enabled(!name.is_empty(), egui::Button::new("Sign in"))
                    .clicked()
                {
                    let role = if self.auth_admin { ADMIN_ROLE } else { "reader" };
                    let user = UserInfo::new(name, role);
                    if let Some(store) = self.store.clone() {
                        self.auth.login(&store, user);
                    } else {
                        self.auth.login_in_memory(user);
                    }
                    self.route = route_for(self.auth.current());
                    if self.route == Route::Viewer {
                        self.restore_session();
                    }
                }
            });
        });
    }

    fn draw_home(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.heading("Pagemark");
                ui.add_space(16.0);
                if let Some(user) = self.auth.current() {
                    ui.label(format!("Signed in as {} ({})", user.name, user.role));
                }
                ui.label("Only administrators can open the viewer.");
                ui.add_space(12.0);
                if ui.button("Sign out").clicked() {
                    self.sign_out();
                }
            });
        });
    }
}
