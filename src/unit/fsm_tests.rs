/*
 * Unit tests for the unit module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_unit_init
 * - test_status_cell_steps
 * - test_claim_is_exclusive
 * - test_trip_up
 * - test_trip_down
 * - test_same_floor_trip
 * - test_terminate_drains_queued_command
 * - test_terminate_with_empty_queue
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::config::TimingConfig;
    use crate::shared::{Command, Motion, Request};
    use crate::unit::{StatusCell, UnitFsm};
    use crossbeam_channel::bounded;
    use crossbeam_channel::unbounded;
    use std::thread::spawn;
    use std::time::{Duration, Instant};

    fn setup_fsm(
        start_floor: u8,
        travel_tick_ms: u64,
        dwell_tick_ms: u64,
    ) -> (
        UnitFsm,
        StatusCell,
        crossbeam_channel::Sender<Command>,
        crossbeam_channel::Sender<()>,
    ) {
        // Arrange the command slot, terminate channel and shared status
        let (command_tx, command_rx) = bounded::<Command>(1);
        let (terminate_tx, terminate_rx) = unbounded::<()>();
        let status = StatusCell::new(start_floor);

        let config = TimingConfig {
            travel_tick_ms,
            dwell_tick_ms,
        };

        (
            UnitFsm::new(0, status.clone(), command_rx, terminate_rx, &config),
            status,
            command_tx,
            terminate_tx,
        )
    }

    fn request(rider: &str, from: u8, to: u8) -> Request {
        Request {
            rider: rider.to_string(),
            from,
            to,
        }
    }

    fn wait_until<F: Fn() -> bool>(pred: F, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if pred() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        pred()
    }

    #[test]
    fn test_unit_init() {
        // Purpose: A fresh unit is idle and assignable at its start floor

        // Arrange
        let (_fsm, status, _command_tx, _terminate_tx) = setup_fsm(1, 5, 10);

        // Assert
        assert_eq!(status.floor(), 1);
        assert_eq!(status.motion(), Motion::Idle);
        let snapshot = status.idle_snapshot(0).expect("fresh unit must be assignable");
        assert_eq!(snapshot.id, 0);
        assert_eq!(snapshot.current_floor, 1);
    }

    #[test]
    fn test_status_cell_steps() {
        // Purpose: Each step moves the floor by exactly one

        // Arrange
        let status = StatusCell::new(3);

        // Act / Assert
        assert_eq!(status.ascend(), 4);
        assert_eq!(status.ascend(), 5);
        assert_eq!(status.descend(), 4);
        assert_eq!(status.floor(), 4);
    }

    #[test]
    fn test_claim_is_exclusive() {
        // Purpose: A claimed unit cannot be claimed again until released

        // Arrange
        let status = StatusCell::new(1);

        // Act / Assert
        assert!(status.try_claim());
        assert!(!status.try_claim());
        assert!(status.idle_snapshot(0).is_none());

        status.release();
        assert!(status.try_claim());
    }

    #[test]
    fn test_trip_up() {
        // Purpose: A trip upwards visits one floor per tick, ends Stopped at
        // the destination and makes the unit assignable again after the
        // door cycle

        // Arrange
        let (fsm, status, command_tx, terminate_tx) = setup_fsm(1, 20, 10);
        let fsm_thread = spawn(move || fsm.run());

        // Act
        assert!(status.try_claim());
        let started = Instant::now();
        command_tx.send(Command::new(request("Alice", 1, 5))).unwrap();

        // Assert
        assert!(
            wait_until(|| status.motion() == Motion::MovingUp, Duration::from_secs(3)),
            "unit never started moving up"
        );
        assert!(
            wait_until(
                || status.floor() == 5 && status.motion() == Motion::Stopped,
                Duration::from_secs(3)
            ),
            "unit never arrived at floor 5"
        );
        // Four floors of travel cannot complete in fewer than four ticks
        assert!(started.elapsed() >= Duration::from_millis(4 * 20));

        assert!(
            wait_until(|| status.idle_snapshot(0).is_some(), Duration::from_secs(3)),
            "unit never became assignable after the door cycle"
        );
        assert_eq!(status.floor(), 5);

        // Cleanup
        terminate_tx.send(()).unwrap();
        fsm_thread.join().unwrap();
    }

    #[test]
    fn test_trip_down() {
        // Purpose: A trip downwards mirrors the upward case

        // Arrange
        let (fsm, status, command_tx, terminate_tx) = setup_fsm(9, 5, 10);
        let fsm_thread = spawn(move || fsm.run());

        // Act
        assert!(status.try_claim());
        command_tx.send(Command::new(request("Bob", 9, 2))).unwrap();

        // Assert
        assert!(
            wait_until(|| status.motion() == Motion::MovingDown, Duration::from_secs(3)),
            "unit never started moving down"
        );
        assert!(
            wait_until(
                || status.floor() == 2 && status.motion() == Motion::Stopped,
                Duration::from_secs(3)
            ),
            "unit never arrived at floor 2"
        );
        assert!(
            wait_until(|| status.idle_snapshot(0).is_some(), Duration::from_secs(3)),
            "unit never became assignable after the door cycle"
        );

        // Cleanup
        terminate_tx.send(()).unwrap();
        fsm_thread.join().unwrap();
    }

    #[test]
    fn test_same_floor_trip() {
        // Purpose: A request to the current floor stops immediately with no
        // movement ticks and no door cycle

        // Arrange
        let (fsm, status, command_tx, terminate_tx) = setup_fsm(3, 5, 10);
        let fsm_thread = spawn(move || fsm.run());

        // Act
        assert!(status.try_claim());
        command_tx.send(Command::new(request("Carol", 3, 3))).unwrap();

        // Assert
        assert!(
            wait_until(
                || status.motion() == Motion::Stopped && status.idle_snapshot(0).is_some(),
                Duration::from_secs(3)
            ),
            "unit never completed the no-op trip"
        );
        assert_eq!(status.floor(), 3);

        // Cleanup
        terminate_tx.send(()).unwrap();
        fsm_thread.join().unwrap();
    }

    #[test]
    fn test_terminate_drains_queued_command() {
        // Purpose: A command already sitting in the slot is executed to
        // completion before the loop exits

        // Arrange: queue a command and the stop signal before the loop runs
        let (fsm, status, command_tx, terminate_tx) = setup_fsm(1, 5, 10);
        assert!(status.try_claim());
        command_tx.send(Command::new(request("Dave", 1, 4))).unwrap();
        terminate_tx.send(()).unwrap();

        // Act
        let fsm_thread = spawn(move || fsm.run());
        fsm_thread.join().unwrap();

        // Assert
        assert_eq!(status.floor(), 4);
        assert_eq!(status.motion(), Motion::Stopped);
    }

    #[test]
    fn test_terminate_with_empty_queue() {
        // Purpose: The loop exits promptly when nothing is queued

        // Arrange
        let (fsm, status, _command_tx, terminate_tx) = setup_fsm(1, 5, 10);
        let fsm_thread = spawn(move || fsm.run());

        // Act
        terminate_tx.send(()).unwrap();
        fsm_thread.join().unwrap();

        // Assert
        assert_eq!(status.floor(), 1);
        assert_eq!(status.motion(), Motion::Idle);
    }
}
