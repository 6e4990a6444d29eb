//! Node classification against the embedded bodies.

use crate::body::ImplicitBody;
use cf_core::Vec3;
use cf_grid::{Axis, NodeFlag, Partition, Space};

/// Classify every node of the padded space.
///
/// Three passes: reset the whole domain to the exterior sentinel, mark the
/// interior box fluid-or-solid against each body in order (a node inside
/// several bodies binds to the last one tested), then promote solid nodes
/// with at least one fluid 6-neighbor to ghost.
///
/// Runs once for stationary bodies and once per step when bodies move.
pub fn classify<B: ImplicitBody>(space: &mut Space, partition: &Partition, bodies: &[B]) {
    space.reset_flags();

    let ib = partition.interior_box();
    for k in ib.k_sub..ib.k_sup {
        for j in ib.j_sub..ib.j_sup {
            for i in ib.i_sub..ib.i_sup {
                let p = Vec3::new(
                    space.coord_of(Axis::X, i),
                    space.coord_of(Axis::Y, j),
                    space.coord_of(Axis::Z, k),
                );
                let n = space.idx(k, j, i);
                let mut flag = NodeFlag::Fluid;
                for (b, body) in bodies.iter().enumerate() {
                    if body.contains(&p) {
                        flag = NodeFlag::Solid(b as u32);
                    }
                }
                space.set_flag(n, flag);
            }
        }
    }

    // Ghost promotion. Interior nodes always have all six neighbors in the
    // padded domain (ng >= 1 plus the boundary layer).
    let strides = [
        space.stride(Axis::X),
        space.stride(Axis::Y),
        space.stride(Axis::Z),
    ];
    let mut solid = 0usize;
    let mut ghost = 0usize;
    for k in ib.k_sub..ib.k_sup {
        for j in ib.j_sub..ib.j_sup {
            for i in ib.i_sub..ib.i_sup {
                let n = space.idx(k, j, i);
                let NodeFlag::Solid(b) = space.flag(n) else {
                    continue;
                };
                let touches_fluid = strides
                    .iter()
                    .any(|&s| space.flag(n + s).is_fluid() || space.flag(n - s).is_fluid());
                if touches_fluid {
                    space.set_flag(n, NodeFlag::Ghost(b));
                    ghost += 1;
                } else {
                    solid += 1;
                }
            }
        }
    }
    tracing::debug!(bodies = bodies.len(), solid, ghost, "classified domain");
}
