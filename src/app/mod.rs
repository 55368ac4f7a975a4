use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};

use crate::model::{CaseGraph, Category, load_case_graph};

mod graph;
mod physics;
mod render_utils;
mod ui;

use physics::{Simulation, SimulationConfig};

pub struct LexGraphApp {
    graph_path: String,
    state: AppState,
    reload_rx: Option<Receiver<Result<CaseGraph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CaseGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: CaseGraph,
    search: String,
    selected: Option<String>,
    pan: Vec2,
    zoom: f32,
    config: SimulationConfig,
    graph_dirty: bool,
    graph_cache: Option<RenderGraph>,
    search_match_cache: Option<SearchMatchCache>,
    dragged: Option<usize>,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<usize>>,
}

/// Per-load render state: display rows parallel to the model's node order,
/// plus the simulation that owns every kinematic field.
struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<(usize, usize)>,
    simulation: Simulation,
    view_scratch: ViewScratch,
}

struct RenderNode {
    id: String,
    name: String,
    category: Category,
}

struct ViewScratch {
    screen_positions: Vec<Pos2>,
}

impl LexGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph_path: String) -> Self {
        let state = Self::start_load(graph_path.clone());
        Self {
            graph_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(graph_path: String) -> Receiver<Result<CaseGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_case_graph(&graph_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(graph_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(graph_path),
        }
    }
}

impl eframe::App for LexGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Building relationship graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load case graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.graph_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.graph_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.graph_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(graph) => {
                                    // The view transform survives reloads; only the
                                    // simulation state is rebuilt.
                                    let mut next = ViewModel::new(graph);
                                    next.pan = model.pan;
                                    next.zoom = model.zoom;
                                    next.config = model.config;
                                    AppState::Ready(Box::new(next))
                                }
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
