use kiosk_core::{
    flow::KioskSnapshot, FlowState, KioskUpdate, Notice, PaymentStatus, ScannerStatus, Screen,
};

pub fn render_update(update: &KioskUpdate) -> Vec<String> {
    match update {
        KioskUpdate::Snapshot(snapshot) => render_snapshot(snapshot),
        KioskUpdate::Notice(notice) => vec![render_notice(notice)],
        KioskUpdate::PillDispensed(pill) => {
            vec![format!("  dispensed pill {}/{}", pill.sequence, pill.total)]
        }
    }
}

fn render_notice(notice: &Notice) -> String {
    let marker = if notice.is_error() { "!" } else { "*" };
    format!("{marker} {}: {}", notice.title(), notice.message())
}

pub fn render_snapshot(snapshot: &KioskSnapshot) -> Vec<String> {
    let mut lines = vec![format!("[{}] {:?}", snapshot.screen, snapshot.state)];

    match snapshot.screen {
        Screen::Idle => lines.push(
            "  Welcome. Type 'enter' to key in a code or 'scan' for a QR code.".into(),
        ),
        Screen::EnterCode => {
            if snapshot.state == FlowState::Fetching {
                lines.push("  Looking up your prescription...".into());
            } else {
                lines.push("  Enter your code id: code <text>".into());
            }
        }
        Screen::QrScan => lines.push(scanner_line(snapshot.scanner).into()),
        Screen::Prescription => {
            if let Some(prescription) = &snapshot.prescription {
                lines.push(format!(
                    "  {} (age {}, {})",
                    prescription.patient_name, prescription.patient_age, prescription.phone_number
                ));
            }
            for (n, line) in snapshot.medicines.iter().enumerate() {
                let decrease = if line.can_decrease { "" } else { " (min)" };
                lines.push(format!(
                    "  {}. {} x{}{} {} {}",
                    n + 1,
                    line.name,
                    line.no_of_tablets,
                    decrease,
                    line.routine.join("/"),
                    line.timing
                ));
            }
            if let Some(total) = snapshot.total_cost {
                lines.push(format!("  total: {total}"));
            }
            if !snapshot.can_proceed {
                lines.push("  No medicines selected".into());
            }
        }
        Screen::Payment => {
            if let Some(total) = snapshot.total_cost {
                lines.push(format!("  amount due: {total}"));
            }
            let status = match snapshot.payment {
                Some(PaymentStatus::Processing) => "Processing payment...",
                Some(PaymentStatus::Success) => "Payment Successful!",
                Some(PaymentStatus::Error) => "Payment Failed. Type 'retry'.",
                _ => "pay <card>|<name>|<MM/YY>|<cvv>",
            };
            lines.push(format!("  {status}"));
        }
        Screen::Dispensing => {
            if let Some(progress) = &snapshot.dispense {
                lines.push(format!(
                    "  dispensing {}/{} ({}%)",
                    progress.dispensed(),
                    progress.total(),
                    progress.percent_complete()
                ));
            }
        }
        Screen::Complete => {
            lines.push("  Thank you! Please collect your medication.".into());
            if let Some(remaining) = snapshot.countdown {
                lines.push(format!("  returning to start in {remaining}s"));
            }
        }
    }
    lines
}

fn scanner_line(scanner: Option<ScannerStatus>) -> &'static str {
    match scanner {
        Some(ScannerStatus::RequestingPermission) => "  Requesting camera access...",
        Some(ScannerStatus::Armed) => "  Hold your QR code up to the camera.",
        Some(ScannerStatus::Disarmed) => "  Processing code...",
        Some(ScannerStatus::PermissionDenied) | Some(ScannerStatus::Failed) => {
            "  Camera unavailable. Type 'manual' to enter your code, or 'rescan'."
        }
        None => "",
    }
}
