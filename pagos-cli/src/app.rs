//! Interactive terminal loop for the payment flow.
//!
//! Re-renders the phase matching the controller's current state, reads
//! one line of input and dispatches it to the controller. All flow logic
//! stays in `pagos-core`.

use anyhow::Result;
use pagos_core::entities::PaymentMethod;
use pagos_core::flow::{FlowError, FlowState, PaymentFlow};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::screens;

pub async fn run(mut flow: PaymentFlow) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        let today = time::OffsetDateTime::now_utc().date();
        match flow.state() {
            FlowState::Verify => screens::verify_screen(),
            FlowState::List => screens::list_screen(&flow, today),
            FlowState::Gateway => screens::gateway_screen(&flow, today),
            FlowState::Confirmation => screens::confirmation_screen(&flow),
        }

        // stdin closed: leave the loop.
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("salir") {
            break;
        }

        let outcome = match flow.state() {
            FlowState::Verify => {
                println!("Buscando...");
                flow.verify_code(input).await
            }
            FlowState::List => handle_list_input(&mut flow, input),
            FlowState::Gateway => handle_gateway_input(&mut flow, input).await,
            FlowState::Confirmation => flow.finish(),
        };
        if let Err(err) = outcome {
            screens::alert(&screens::alert_text(&err));
        }
    }

    Ok(())
}

fn handle_list_input(flow: &mut PaymentFlow, input: &str) -> Result<(), FlowError> {
    if input.eq_ignore_ascii_case("n") {
        return flow.finish();
    }
    let Ok(number) = input.parse::<usize>() else {
        screens::alert("Opción no reconocida");
        return Ok(());
    };
    let Some(id) = flow
        .student()
        .and_then(|record| record.payments.get(number.wrapping_sub(1)))
        .map(|payment| payment.id.clone())
    else {
        screens::alert("No existe un pago con ese número");
        return Ok(());
    };
    flow.select_payment(&id)
}

async fn handle_gateway_input(flow: &mut PaymentFlow, input: &str) -> Result<(), FlowError> {
    let (command, value) = match input.split_once(' ') {
        Some((command, value)) => (command, value.trim()),
        None => (input, ""),
    };
    match command.to_lowercase().as_str() {
        "1" => {
            flow.set_method(PaymentMethod::Card);
            Ok(())
        }
        "2" => {
            flow.set_method(PaymentMethod::Bank);
            Ok(())
        }
        "3" => {
            flow.set_method(PaymentMethod::Mobile);
            Ok(())
        }
        "titular" => {
            flow.card_mut().set_holder_name(value);
            Ok(())
        }
        "numero" | "número" => {
            flow.card_mut().set_number(value);
            Ok(())
        }
        "vence" => {
            flow.card_mut().set_expiry(value);
            Ok(())
        }
        "cvv" => {
            flow.card_mut().set_cvv(value);
            Ok(())
        }
        "pagar" => {
            println!("Procesando pago...");
            flow.process_payment().await
        }
        "cancelar" => flow.cancel_payment(),
        _ => {
            screens::alert("Opción no reconocida");
            Ok(())
        }
    }
}
