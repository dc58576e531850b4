//! Thread pool selection for parallel meshing

/// Where parallel lattice scans and normal computation are run
pub enum ThreadPool {
    /// A caller-owned pool with a fixed number of threads
    Custom(rayon::ThreadPool),
    /// Rayon's global pool
    Global,
}

impl ThreadPool {
    /// Runs `f` inside this pool, so that any `par_iter` it uses is spread
    /// across the pool's threads
    pub fn run<F: FnOnce() -> V + Send, V: Send>(&self, f: F) -> V {
        match self {
            ThreadPool::Custom(p) => p.install(f),
            ThreadPool::Global => f(),
        }
    }

    /// Returns the number of worker threads available to [`run`](Self::run)
    pub fn thread_count(&self) -> usize {
        match self {
            ThreadPool::Custom(p) => p.current_num_threads(),
            ThreadPool::Global => rayon::current_num_threads(),
        }
    }
}
