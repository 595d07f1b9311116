//! # Phase Benchmarks
//!
//! Resolution cost of the static map versus the symbol-table fallback, and
//! the cost of a full inflection pass.
//!
//! Run with: `cargo bench -p drover-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use drover_core::inflect::{ConfigConsumer, LoggerConsumer};
use drover_core::services::{Config, Logger, SERVICE_CONFIG, SERVICE_LOGGER};
use drover_core::{ContainerBuilder, Inflectable, Inflector, Phase, PhaseRegistry, SymbolTable};
use std::hint::black_box;
use std::sync::Arc;

/// Registry with `extra` extension symbols on top of the canonical ones.
fn registry_with_extensions(extra: usize) -> PhaseRegistry {
    let mut table = SymbolTable::canonical();
    for i in 0..extra {
        let _ = table.register(format!("DRUSH_BOOTSTRAP_EXT_{}", i), Phase::new(100 + i as i32));
    }
    PhaseRegistry::new(Arc::new(table))
}

#[derive(Default)]
struct Command {
    config: Option<Arc<Config>>,
    logger: Option<Arc<Logger>>,
}

impl ConfigConsumer for Command {
    fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }
}

impl LoggerConsumer for Command {
    fn set_logger(&mut self, logger: Arc<Logger>) {
        self.logger = Some(logger);
    }
}

impl Inflectable for Command {
    fn as_config_consumer(&mut self) -> Option<&mut dyn ConfigConsumer> {
        Some(self)
    }

    fn as_logger_consumer(&mut self) -> Option<&mut dyn LoggerConsumer> {
        Some(self)
    }
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_static_resolution(c: &mut Criterion) {
    let registry = PhaseRegistry::default();
    c.bench_function("resolve_static", |b| {
        b.iter(|| black_box(registry.resolve_phase(black_box("configuration"))))
    });
}

fn bench_symbol_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_symbol");

    for size in [0usize, 100, 10000].iter() {
        let registry = registry_with_extensions(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(registry.resolve_phase(black_box("DRUSH_BOOTSTRAP_DRUPAL_LOGIN"))))
        });
    }

    group.finish();
}

fn bench_inflect(c: &mut Criterion) {
    let container = ContainerBuilder::new()
        .register(SERVICE_CONFIG, Config::new())
        .register(SERVICE_LOGGER, Logger::new("bench"))
        .build();

    c.bench_function("inflect_two_capabilities", |b| {
        b.iter(|| {
            let mut command = Command::default();
            let _ = Inflector::inflect(&mut command, container.as_ref());
            black_box(command.config.is_some() && command.logger.is_some())
        })
    });
}

criterion_group!(
    benches,
    bench_static_resolution,
    bench_symbol_resolution,
    bench_inflect
);
criterion_main!(benches);
