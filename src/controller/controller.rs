/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, warn};
use std::sync::Mutex;
use std::sync::RwLock;
use std::thread::Builder;
use std::thread::JoinHandle;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::controller::dispatch;
use crate::shared::{Command, DispatchError, Request, UnitSnapshot};
use crate::unit::{StatusCell, UnitFsm};

/**
 * Owns the fixed pool of elevator units and the request intake boundary.
 *
 * Construction builds the pool and spawns one worker thread per unit; the
 * pool itself is never resized afterwards, so only each unit's status cell
 * needs locking. Ride requests claim a unit through the dispatch policy and
 * hand the command over without blocking. Shutdown closes the intake,
 * signals every worker and joins them, draining accepted work first.
 *
 * # Fields
 * - `units`:       The pool, in fixed index order.
 * - `workers`:     Join handles of the per-unit worker threads.
 * - `intake_open`: Gate closed at the start of shutdown. Requests hold the
 *                  shared side for the duration of a handoff, so no handoff
 *                  can race past the stop signals.
 * - `n_floors`:    Highest serviced floor, for request validation.
 */

/// One pool slot: the controller-side handle of an elevator unit. The
/// worker thread holds the other ends of both channels.
pub struct Unit {
    pub id: u8,
    status: StatusCell,
    command_tx: cbc::Sender<Command>,
    terminate_tx: cbc::Sender<()>,
}

impl Unit {
    pub fn idle_snapshot(&self) -> Option<UnitSnapshot> {
        self.status.idle_snapshot(self.id)
    }

    pub fn try_claim(&self) -> bool {
        self.status.try_claim()
    }
}

pub struct Controller {
    units: Vec<Unit>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    intake_open: RwLock<bool>,
    n_floors: u8,
}

impl Controller {
    pub fn new(config: &Config) -> Controller {
        let n_units = config.pool.n_units as usize;
        let mut units = Vec::with_capacity(n_units);
        let mut workers = Vec::with_capacity(n_units);

        for id in 0..config.pool.n_units {
            let (command_tx, command_rx) = cbc::bounded::<Command>(1);
            let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
            let status = StatusCell::new(config.pool.start_floor);

            let fsm = UnitFsm::new(id, status.clone(), command_rx, terminate_rx, &config.timing);
            let worker_thread = Builder::new().name(format!("unit-{}", id));
            workers.push(worker_thread.spawn(move || fsm.run()).unwrap());

            units.push(Unit {
                id,
                status,
                command_tx,
                terminate_tx,
            });
        }

        Controller {
            units,
            workers: Mutex::new(workers),
            intake_open: RwLock::new(true),
            n_floors: config.pool.n_floors,
        }
    }

    /// Assign the request to the first eligible unit and hand it over.
    /// Returns the unit id, or a typed failure without blocking or retrying.
    pub fn request_ride(&self, request: Request) -> Result<u8, DispatchError> {
        let intake = self.intake_open.read().unwrap();
        if !*intake {
            return Err(DispatchError::ShuttingDown);
        }

        self.check_floor(request.from)?;
        self.check_floor(request.to)?;

        let unit = match dispatch::claim_eligible_unit(&self.units) {
            Some(unit) => unit,
            None => {
                warn!("no idle elevator available, rider: {}", request.rider);
                return Err(DispatchError::NoEligibleUnit);
            }
        };

        info!(
            "assigning idle unit {} to request, rider: {}, from {} to {}",
            unit.id, request.rider, request.from, request.to
        );

        // The claim keeps the slot free until the trip completes, so the
        // send can only fail once the worker has already exited.
        if unit.command_tx.try_send(Command::new(request)).is_err() {
            unit.status.release();
            return Err(DispatchError::ShuttingDown);
        }

        Ok(unit.id)
    }

    /// Status query reusing the dispatch scan; never reports a mid-trip
    /// unit and assigns nothing.
    pub fn query_idle_unit(&self) -> Option<UnitSnapshot> {
        dispatch::find_eligible_unit(&self.units)
    }

    /// Stop accepting rides, signal every unit and block until all worker
    /// loops have drained their accepted work and exited.
    pub fn shutdown(&self) {
        {
            let mut intake = self.intake_open.write().unwrap();
            *intake = false;
        }

        info!("shutting down, waiting for all units to drain");
        for unit in &self.units {
            let _ = unit.terminate_tx.send(());
        }

        let workers = std::mem::take(&mut *self.workers.lock().unwrap());
        for worker in workers {
            let _ = worker.join();
        }
        info!("all units stopped");
    }

    fn check_floor(&self, floor: u8) -> Result<(), DispatchError> {
        if floor < 1 || floor > self.n_floors {
            return Err(DispatchError::InvalidFloor {
                floor,
                max: self.n_floors,
            });
        }
        Ok(())
    }
}
