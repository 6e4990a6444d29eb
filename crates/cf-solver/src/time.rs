//! Time loop: CFL step control, stage sequencing, divergence checks.

use crate::boundary::apply_boundaries;
use crate::error::{SolverError, SolverResult};
use crate::sweep::sweep_stage;
use cf_case::{Integrator, Setup};
use cf_core::{max_abs3, Real, Timer};
use cf_fluids::{Conservative, GasModel};
use cf_grid::{field, Field, Partition, Space};
use cf_ibm::{apply_wall_model, classify, ImplicitBody, Sphere};

/// Mutable state advanced by the loop.
#[derive(Debug)]
pub struct RunState {
    pub step: u64,
    pub time: Real,
    pub field: Field,
    pub bodies: Vec<Sphere>,
}

/// Largest stable time step: `cfl * min(ds) / max(|u_s| + c)` over the
/// interior fluid nodes.
pub fn stable_dt(
    space: &Space,
    partition: &Partition,
    model: &GasModel,
    cfl: Real,
    buf: &[Real],
) -> SolverResult<Real> {
    let ib = partition.interior_box();
    let mut max_speed: Real = 0.0;
    for k in ib.k_sub..ib.k_sup {
        for j in ib.j_sub..ib.j_sup {
            for i in ib.i_sub..ib.i_sup {
                let n = space.idx(k, j, i);
                if !space.flag(n).is_fluid() {
                    continue;
                }
                let prim = model
                    .primitive(&Conservative::from_slice(field::node(buf, n)))
                    .map_err(|source| SolverError::NonPhysical {
                        k,
                        j,
                        i,
                        step: 0,
                        source,
                    })?;
                let c = model.sound_speed(&prim);
                let speed = max_abs3(prim.u, prim.v, prim.w) + c;
                max_speed = max_speed.max(speed);
            }
        }
    }
    let min_ds = space.dx.min(space.dy).min(space.dz);
    Ok(cfl * min_ds / max_speed)
}

/// NaN scan of the interior box after a step.
fn check_finite(
    space: &Space,
    partition: &Partition,
    buf: &[Real],
    step: u64,
) -> SolverResult<()> {
    let ib = partition.interior_box();
    for k in ib.k_sub..ib.k_sup {
        for j in ib.j_sub..ib.j_sup {
            for i in ib.i_sub..ib.i_sup {
                let n = space.idx(k, j, i);
                if field::node(buf, n).iter().any(|v| !v.is_finite()) {
                    return Err(SolverError::Diverged { step });
                }
            }
        }
    }
    Ok(())
}

const PROGRESS_EVERY: u64 = 200;

/// Run the time loop to completion.
///
/// `on_export` fires once with index 0 for the initial state (when exports
/// are enabled) and then once per reached output interval; it receives the
/// state at the current time level.
pub fn run<F>(setup: &Setup, mut on_export: F) -> SolverResult<RunState>
where
    F: FnMut(&Space, &RunState, usize) -> SolverResult<()>,
{
    let mut space = setup.space.clone();
    let partition = &setup.partition;
    let model = &setup.model;

    let mut state = RunState {
        step: 0,
        time: 0.0,
        field: setup.initial_field(),
        bodies: setup.bodies.clone(),
    };

    classify(&mut space, partition, &state.bodies);
    apply_boundaries(&space, partition, model, state.field.now_mut())?;
    apply_wall_model(&space, partition, model, &state.bodies, state.field.now_mut())?;

    let mut exported = 0usize;
    if setup.output.count > 0 {
        on_export(&space, &state, exported)?;
        exported += 1;
    }

    let moving = state.bodies.iter().any(|b| b.is_moving());
    let timer = Timer::start("solve");
    tracing::info!(
        name = %setup.name,
        total_time = setup.time.total_time,
        max_steps = setup.time.max_steps,
        "starting time loop"
    );

    while state.time < setup.time.total_time && state.step < setup.time.max_steps {
        let dt_cfl = stable_dt(&space, partition, model, setup.time.cfl, state.field.now())?;
        let dt = dt_cfl.min(setup.time.total_time - state.time);
        if dt < dt_cfl {
            tracing::debug!(dt, dt_cfl, "clipping final step to land on total time");
        }

        // Stage 1: forward Euler predictor into the next level.
        {
            let (read, write) = state.field.read_write();
            sweep_stage(
                &space, partition, model, &setup.scheme, dt, 0.0, 1.0, state.step, read, write,
            )?;
        }
        apply_boundaries(&space, partition, model, state.field.next_mut())?;
        apply_wall_model(
            &space,
            partition,
            model,
            &state.bodies,
            state.field.next_mut(),
        )?;

        match setup.time.integrator {
            Integrator::Euler => state.field.swap(),
            Integrator::Rk2 => {
                // Blended corrector lands back in the current level.
                {
                    let (read, write) = state.field.read_write_rev();
                    sweep_stage(
                        &space, partition, model, &setup.scheme, dt, 0.5, 0.5, state.step, read,
                        write,
                    )?;
                }
                apply_boundaries(&space, partition, model, state.field.now_mut())?;
                apply_wall_model(
                    &space,
                    partition,
                    model,
                    &state.bodies,
                    state.field.now_mut(),
                )?;
            }
        }

        state.step += 1;
        state.time += dt;
        check_finite(&space, partition, state.field.now(), state.step)?;

        if moving {
            for b in &mut state.bodies {
                b.center += b.velocity * dt;
            }
            classify(&mut space, partition, &state.bodies);
            apply_wall_model(
                &space,
                partition,
                model,
                &state.bodies,
                state.field.now_mut(),
            )?;
        }

        if state.step % PROGRESS_EVERY == 0 {
            tracing::info!(step = state.step, time = state.time, dt, "progress");
        }

        while setup.output.count > 0
            && exported <= setup.output.count
            && state.time + 1e-12
                >= setup.time.total_time * exported as Real / setup.output.count as Real
        {
            on_export(&space, &state, exported)?;
            exported += 1;
        }
    }

    tracing::info!(
        steps = state.step,
        time = state.time,
        elapsed = timer.elapsed(),
        "time loop finished"
    );
    Ok(state)
}
