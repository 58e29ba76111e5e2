use super::{GraphFilter, GraphGenerator};
use crate::graph_resolution::domain::GraphStore;
use crate::ports::outbound::MetadataSource;
use std::cell::{Ref, RefCell};

/// GraphService - the resolution engine and the filter, built once and
/// handed to the coordinator
pub struct GraphService<M> {
    generator: GraphGenerator<M>,
    filter: RefCell<GraphFilter>,
}

impl<M: MetadataSource> GraphService<M> {
    pub fn new(generator: GraphGenerator<M>) -> Self {
        Self::with_filter(generator, GraphFilter::new())
    }

    pub fn with_filter(generator: GraphGenerator<M>, filter: GraphFilter) -> Self {
        Self {
            generator,
            filter: RefCell::new(filter),
        }
    }

    pub fn generator(&self) -> &GraphGenerator<M> {
        &self.generator
    }

    pub fn source(&self) -> &M {
        self.generator.source()
    }

    pub fn store(&self) -> Ref<'_, GraphStore> {
        self.generator.store()
    }

    pub fn set_filter(&self, text: &str) {
        self.filter.borrow_mut().set_filter(text);
    }

    /// Recomputes node visibility; returns the number of visible nodes
    pub fn refresh(&self) -> usize {
        let filter = self.filter.borrow();
        self.generator.with_store_mut(|store| filter.refresh(store))
    }
}
