use crate::actions::Action;
use crate::canvas::{EguiCanvas, to_canvas};
use crate::state::State;
use crate::store::Store;
use eframe::egui;
use schema_tree::{Canvas, Point, Side};

const PANEL_WIDTH: f32 = 340.0;
const SCHEMA_EDITOR_ROWS: usize = 24;

pub struct MapperApp {
    state: State,
}

impl MapperApp {
    pub fn new(state: State) -> Self {
        Self { state }
    }

    fn dispatch_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.state.dispatch(action);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        let side = self.state.store.input_side;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Schema…").clicked() {
                        ui.close();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file()
                        {
                            actions.push(Action::OpenSchemaFile { side, path });
                        }
                    }

                    ui.separator();

                    if ui.button("Save Project").clicked() {
                        ui.close();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .save_file()
                        {
                            actions.push(Action::SaveToFile { path });
                        }
                    }

                    if ui.button("Load Project").clicked() {
                        ui.close();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file()
                        {
                            actions.push(Action::LoadFromFile { path });
                        }
                    }
                });
            });
        });

        self.dispatch_all(actions);
    }

    fn render_input_panel(&mut self, ctx: &egui::Context) {
        let store = &self.state.store;
        let mut actions = Vec::new();

        egui::SidePanel::left("input_panel")
            .exact_width(PANEL_WIDTH)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.heading("Schema");
                ui.separator();

                let mut side = store.input_side;
                ui.horizontal(|ui| {
                    for candidate in Side::ALL {
                        ui.selectable_value(
                            &mut side,
                            candidate,
                            candidate.label(),
                        );
                    }
                });
                if side != store.input_side {
                    actions.push(Action::SetInputSide { side });
                }

                let mut text = store.schema_text(side).to_string();
                egui::ScrollArea::vertical()
                    .max_height(ui.available_height() * 0.6)
                    .show(ui, |ui| {
                        let editor = egui::TextEdit::multiline(&mut text)
                            .code_editor()
                            .desired_rows(SCHEMA_EDITOR_ROWS)
                            .desired_width(f32::INFINITY);
                        if ui.add(editor).changed() {
                            actions.push(Action::SetSchemaText {
                                side,
                                text: text.clone(),
                            });
                        }
                    });

                if ui.button(format!("Load {} Schema", side.label())).clicked()
                {
                    actions.push(Action::LoadSchema { side });
                }

                ui.add_space(12.0);
                ui.heading("Intermediate");
                ui.separator();

                let mut name = store.intermediate_name.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut name)
                        .hint_text("Node name"),
                );
                if response.changed() {
                    actions.push(Action::SetIntermediateName {
                        name: name.clone(),
                    });
                }
                let submitted = response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    if ui.button("Create Node").clicked() || submitted {
                        actions.push(Action::CreateIntermediateNode {
                            name: name.clone(),
                        });
                    }
                    if ui.button("Clear").clicked() {
                        actions.push(Action::ClearIntermediate);
                    }
                });
            });

        self.dispatch_all(actions);
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let orphaned = match self.state.cache.scene.get(&self.state.store) {
            Ok(scene) => scene.unresolved.len(),
            Err(_) => 0,
        };
        let status = status_line(&self.state.store);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(status);
                if orphaned > 0 {
                    ui.colored_label(
                        ui.visuals().warn_fg_color,
                        format!("{orphaned} mappings point at missing nodes"),
                    );
                }
            });
        });
    }

    fn render_canvas(&mut self, ctx: &egui::Context) {
        let settings = self.state.store.settings.clone();
        let size = egui::vec2(settings.canvas_width, settings.canvas_height);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let (response, painter) =
                    ui.allocate_painter(size, egui::Sense::click_and_drag());
                let origin = response.rect.min;

                // pointer events are applied before painting
                let pointer = ui.input(|i| i.pointer.clone());
                let at = |pos: egui::Pos2| to_canvas(origin, pos);
                if let Some(pos) = pointer.press_origin()
                    && pointer.primary_pressed()
                    && response.rect.contains(pos)
                {
                    self.state.dispatch(Action::PointerDown { at: at(pos) });
                }
                if pointer.is_moving()
                    && pointer.primary_down()
                    && let Some(pos) = pointer.hover_pos()
                {
                    self.state.dispatch(Action::PointerMove { at: at(pos) });
                }
                if pointer.primary_released()
                    && let Some(pos) = pointer.interact_pos()
                {
                    self.state.dispatch(Action::PointerUp { at: at(pos) });
                }
                self.state.flush_actions();

                let mut canvas =
                    EguiCanvas::new(&painter, origin, settings.label_font_size);
                match self.state.cache.scene.get(&self.state.store) {
                    Ok(scene) => {
                        let drag_line =
                            self.state.store.session.drag_line(scene);
                        scene.paint(&mut canvas, drag_line);
                    }
                    Err(e) => {
                        canvas.clear();
                        canvas.label(
                            Point::new(settings.margin, settings.margin),
                            &format!("Render aborted: {e}"),
                        );
                    }
                }
            });
        });
    }

    fn render_error_window(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.state.store.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.dispatch(Action::ClearErrorMessage);
                    }
                });
        }
    }
}

/// Model counts, plus the node a pending edge starts from.
fn status_line(store: &Store) -> String {
    let model = store.model.get();
    let mut status = format!(
        "{} source nodes · {} target nodes · {} intermediate nodes · {} mappings",
        model.source.len(),
        model.target.len(),
        model.intermediate.nodes.len(),
        model.intermediate.edges.len(),
    );
    if let Some(id) = store.session.selected_id() {
        status.push_str(&format!(" · connecting from {id}"));
    }
    status
}

impl eframe::App for MapperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        #[cfg(not(target_arch = "wasm32"))]
        self.render_menu_bar(ctx);
        self.render_input_panel(ctx);
        self.render_status_bar(ctx);
        self.render_canvas(ctx);
        self.render_error_window(ctx);

        self.state.flush_actions();
        self.state.flush_effects();
    }
}
