use crate::config::TimingConfig;
use crate::shared::Command;
use crate::shared::Motion;
use crate::unit::status::StatusCell;
use crossbeam_channel as cbc;
use log::{debug, info};
use std::thread;
use std::time::Duration;

/**
 * Runs one elevator unit.
 *
 * The `UnitFsm` owns the receiving end of its unit's single-slot command
 * queue and executes one command to completion per loop iteration: it ticks
 * the unit one floor at a time until the destination is reached, holds for
 * one door cycle, and only then makes the unit assignable again. A terminate
 * signal stops the loop after any command still sitting in the queue has
 * been drained.
 *
 * # Fields
 * - `id`:              Identifier of the unit this worker drives.
 * - `status`:          Shared status cell, also read by the controller.
 * - `command_rx`:      Receiver for the unit's bounded command slot.
 * - `terminate_rx`:    Receiver for the shutdown signal.
 * - `travel_tick`:     Duration of one floor of movement.
 * - `dwell_tick`:      Door-cycle hold time after arrival.
 */
pub struct UnitFsm {
    id: u8,
    status: StatusCell,
    command_rx: cbc::Receiver<Command>,
    terminate_rx: cbc::Receiver<()>,
    travel_tick: Duration,
    dwell_tick: Duration,
}

impl UnitFsm {
    pub fn new(
        id: u8,
        status: StatusCell,
        command_rx: cbc::Receiver<Command>,
        terminate_rx: cbc::Receiver<()>,
        config: &TimingConfig,
    ) -> UnitFsm {
        UnitFsm {
            id,
            status,
            command_rx,
            terminate_rx,
            travel_tick: Duration::from_millis(config.travel_tick_ms),
            dwell_tick: Duration::from_millis(config.dwell_tick_ms),
        }
    }

    pub fn run(self) {
        loop {
            cbc::select! {
                recv(self.command_rx) -> command => {
                    match command {
                        Ok(command) => self.execute(command),
                        Err(_) => return,
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    info!("unit {} received stop signal, draining pending work", self.id);
                    while let Ok(command) = self.command_rx.try_recv() {
                        self.execute(command);
                    }
                    info!("unit {} stopped", self.id);
                    return;
                }
            }
        }
    }

    fn execute(&self, command: Command) {
        let request = command.request;
        let floor = self.status.floor();

        if request.to == floor {
            // Already at the destination: no movement ticks, no door cycle
            info!(
                "unit {} already at floor {}, rider: {}",
                self.id, floor, request.rider
            );
            self.status.set_motion(Motion::Stopped);
            self.status.release();
            return;
        }

        let motion = if request.to > floor {
            Motion::MovingUp
        } else {
            Motion::MovingDown
        };
        self.status.set_motion(motion);
        info!(
            "unit {} taking {} from floor {} to {}",
            self.id, request.rider, floor, request.to
        );

        while self.status.floor() != request.to {
            thread::sleep(self.travel_tick);
            let floor = match motion {
                Motion::MovingUp => self.status.ascend(),
                _ => self.status.descend(),
            };
            debug!("unit {} passing floor {}", self.id, floor);
        }

        self.status.set_motion(Motion::Stopped);
        info!(
            "unit {} arrived at floor {}, rider: {}",
            self.id, request.to, request.rider
        );

        // Door cycle; the unit becomes assignable again only once it is over
        thread::sleep(self.dwell_tick);
        self.status.release();
    }
}
