/// Alert policy for the AquaAlert service.
///
/// Submodules:
/// - `thresholds` — severity classification and alert record construction.
///
/// Delivery (SMS, push) is not performed; an alert is a row in the alert log.

pub mod thresholds;
