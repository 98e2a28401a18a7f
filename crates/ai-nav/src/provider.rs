use core::cell::RefCell;
use std::sync::Arc;

use crate::{NavGraph, NavGraphConfig, NavPath, PathFinder, PathQuery, PathSource, Rect, Vec2};

/// Narrow path-finding capability handed to agents.
///
/// Behavior states only ever need `find_path`; they never see the coordinator or the graph.
pub trait PathProvider {
    fn find_path(&self, from: Vec2, to: Vec2) -> NavPath;
}

/// Provider for levels without geometry: every query is the direct fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectPaths;

impl PathProvider for DirectPaths {
    fn find_path(&self, from: Vec2, to: Vec2) -> NavPath {
        NavPath::direct(from, to, PathSource::EmptyGraph)
    }
}

/// Cached navigation graph plus a path finder and reusable scratch buffers.
///
/// Rebuilding swaps the whole graph; the old one is dropped once no caller holds it.
#[derive(Debug)]
pub struct NavService {
    graph: Arc<NavGraph>,
    finder: PathFinder,
    query: RefCell<PathQuery>,
}

impl NavService {
    pub fn new(graph: Arc<NavGraph>, finder: PathFinder) -> Self {
        Self {
            graph,
            finder,
            query: RefCell::new(PathQuery::default()),
        }
    }

    pub fn without_graph(finder: PathFinder) -> Self {
        Self::new(Arc::new(NavGraph::empty()), finder)
    }

    pub fn graph(&self) -> &Arc<NavGraph> {
        &self.graph
    }

    pub fn finder(&self) -> &PathFinder {
        &self.finder
    }

    pub fn set_graph(&mut self, graph: Arc<NavGraph>) {
        self.graph = graph;
    }

    pub fn rebuild(&mut self, platforms: &[Rect], config: &NavGraphConfig) {
        self.graph = Arc::new(NavGraph::build(platforms, config));
    }
}

impl PathProvider for NavService {
    fn find_path(&self, from: Vec2, to: Vec2) -> NavPath {
        match self.query.try_borrow_mut() {
            Ok(mut query) => self.finder.find_path_with(&self.graph, from, to, &mut query),
            // Re-entrant call; fall back to a one-off scratch buffer.
            Err(_) => self.finder.find_path(&self.graph, from, to),
        }
    }
}

impl<P: PathProvider + ?Sized> PathProvider for &P {
    fn find_path(&self, from: Vec2, to: Vec2) -> NavPath {
        (**self).find_path(from, to)
    }
}
