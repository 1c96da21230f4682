//! C ABI over [`SimulationEngine`].
//!
//! Fallible calls return `0` on success and a negative [`Status`] code on
//! failure. A null handle is reported as [`Status::NullHandle`].

use crate::{
    body::Body,
    error::EngineError,
    simulation::SimulationEngine,
};

#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    NullHandle = -1,
    DegenerateGeometry = -2,
    StepConvergence = -3,
    InvalidBody = -4,
    InvalidStep = -5,
    Config = -6,
}

impl From<&EngineError> for Status {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::DegenerateGeometry { .. } => Status::DegenerateGeometry,
            EngineError::StepConvergence { .. } => Status::StepConvergence,
            EngineError::InvalidBody(_) => Status::InvalidBody,
            EngineError::InvalidStep(_) => Status::InvalidStep,
            EngineError::Config(_) => Status::Config,
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn Simulation_Create() -> *mut SimulationEngine {
    Box::into_raw(Box::new(SimulationEngine::new()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut SimulationEngine) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// Adds a body; on success its id is written to `out_id` when non-null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddObject(
    handle: *mut SimulationEngine,
    x: f64,
    y: f64,
    mass: f64,
    radius: f64,
    vx: f64,
    vy: f64,
    out_id: *mut u64,
) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return Status::NullHandle as i32;
    };

    match sim.add_object(Body::new(x, y, mass, radius).with_velocity(vx, vy)) {
        Ok(id) => {
            if let Some(out) = unsafe { out_id.as_mut() } {
                *out = id.0;
            }
            Status::Ok as i32
        }
        Err(e) => Status::from(&e) as i32,
    }
}

/// Adaptive step; the step size used is written to `out_dt` when non-null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut SimulationEngine, out_dt: *mut f64) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return Status::NullHandle as i32;
    };

    match sim.step() {
        Ok(dt) => {
            if let Some(out) = unsafe { out_dt.as_mut() } {
                *out = dt;
            }
            Status::Ok as i32
        }
        Err(e) => Status::from(&e) as i32,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_StepBy(handle: *mut SimulationEngine, dt: f64) -> i32 {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return Status::NullHandle as i32;
    };

    match sim.step_by(dt) {
        Ok(()) => Status::Ok as i32,
        Err(e) => Status::from(&e) as i32,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const SimulationEngine) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.objects().len())
}

/// Pointer to the live bodies; valid until the next mutating call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodies(handle: *const SimulationEngine) -> *const Body {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| sim.objects().as_ptr())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetDt(handle: *const SimulationEngine) -> f64 {
    unsafe { handle.as_ref() }.map_or(0.0, |sim| sim.dt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_handle() {
        let handle = Simulation_Create();
        let mut id = u64::MAX;

        unsafe {
            assert_eq!(
                Simulation_AddObject(handle, 0.0, 0.0, 5.97e24, 6.4e6, 0.0, 0.0, &mut id),
                0
            );
            assert_eq!(id, 0);
            assert_eq!(
                Simulation_AddObject(handle, 3.84e8, 0.0, 7.35e22, 1.7e6, 0.0, 0.0, &mut id),
                0
            );
            assert_eq!(id, 1);
            assert_eq!(Simulation_GetBodyCount(handle), 2);

            let mut dt = 0.0;
            assert_eq!(Simulation_Step(handle, &mut dt), 0);
            assert_eq!(dt, Simulation_GetDt(handle));
            assert_eq!(Simulation_StepBy(handle, 60.0), 0);

            let bodies = std::slice::from_raw_parts(
                Simulation_GetBodies(handle),
                Simulation_GetBodyCount(handle),
            );
            assert_eq!(bodies[1].id().0, 1);

            Simulation_Destroy(handle);
        }
    }

    #[test]
    fn errors_map_to_status_codes() {
        let handle = Simulation_Create();
        unsafe {
            assert_eq!(
                Simulation_AddObject(handle, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0, std::ptr::null_mut()),
                Status::InvalidBody as i32
            );
            assert_eq!(Simulation_StepBy(handle, 0.0), Status::InvalidStep as i32);
            Simulation_Destroy(handle);

            let null = std::ptr::null_mut();
            assert_eq!(Simulation_StepBy(null, 1.0), Status::NullHandle as i32);
            assert_eq!(Simulation_GetBodyCount(null), 0);
            assert!(Simulation_GetBodies(null).is_null());
        }
    }
}
