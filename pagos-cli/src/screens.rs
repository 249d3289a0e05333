//! Phase rendering for the terminal front-end.
//!
//! Presentation only: these functions print the current phase and own no
//! flow logic. The Spanish copy mirrors the school's mobile app.

use pagos_core::entities::{
    BankTransferDetails, CodeError, PaymentItem, PaymentMethod, PaymentStatus,
};
use pagos_core::flow::{DueStatus, FlowError, PaymentFlow};
use time::macros::format_description;

fn format_date(date: time::Date) -> String {
    date.format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| date.to_string())
}

fn student_header(flow: &PaymentFlow) {
    if let (Some(record), Some(code)) = (flow.student(), flow.student_code()) {
        println!("{} — {}", record.name, record.grade);
        println!("Código: {code}");
    }
}

pub fn verify_screen() {
    println!();
    println!("=== Consulta de Pagos ===");
    println!("Ingresa tu código modular (SIAGE) para consultar tus pagos pendientes.");
    println!("Si no recuerdas tu código modular, puedes consultar en la sección de Chatbot.");
    println!("Código Modular (SIAGE), ej. 12345 (o 'salir'):");
}

pub fn list_screen(flow: &PaymentFlow, today: time::Date) {
    println!();
    student_header(flow);
    let Some(record) = flow.student() else {
        return;
    };

    if record.payments.is_empty() {
        println!();
        println!("¡Pagos al día! No tienes pagos pendientes en este momento.");
    } else {
        println!();
        println!("Resumen de Pagos");
        println!("{} conceptos pendientes", record.pending_count());
        println!("Total: S/ {:.2}", record.total_pending_amount());
        println!();
        for (idx, payment) in record.payments.iter().enumerate() {
            print_payment_line(idx + 1, payment, today);
        }
    }
    println!();
    println!("Elige el número de un pago, 'n' para una nueva consulta o 'salir'.");
}

fn print_payment_line(number: usize, payment: &PaymentItem, today: time::Date) {
    let due = match DueStatus::classify(payment.due_date, today) {
        DueStatus::Overdue => "VENCIDO".to_owned(),
        DueStatus::ClosingSoon { days_left } => format!("{days_left} días restantes"),
        DueStatus::OnSchedule { .. } => format_date(payment.due_date),
    };
    let status = match payment.status {
        PaymentStatus::Paid => " [Pagado]",
        PaymentStatus::Pending => "",
    };
    match &payment.month {
        Some(month) => println!(
            "{number}. {} ({month}) - S/ {:.2} - {due}{status}",
            payment.kind.label(),
            payment.amount
        ),
        None => println!(
            "{number}. {} - S/ {:.2} - {due}{status}",
            payment.kind.label(),
            payment.amount
        ),
    }
}

pub fn gateway_screen(flow: &PaymentFlow, today: time::Date) {
    println!();
    student_header(flow);
    let Some(payment) = flow.selected_payment() else {
        return;
    };

    println!();
    println!("=== Pasarela de Pagos ===");
    println!("Concepto: {}", payment.kind.label());
    if let Some(month) = &payment.month {
        println!("Periodo: {month}");
    }
    println!("Monto: S/ {:.2}", payment.amount);
    let overdue = matches!(
        DueStatus::classify(payment.due_date, today),
        DueStatus::Overdue
    );
    println!(
        "Fecha límite: {}{}",
        format_date(payment.due_date),
        if overdue { " (VENCIDO)" } else { "" }
    );

    println!();
    println!("Método de Pago: [1] Tarjeta  [2] Banco  [3] Móvil");
    match flow.method() {
        PaymentMethod::Card => card_form(flow),
        PaymentMethod::Bank => bank_form(flow, payment),
        PaymentMethod::Mobile => mobile_form(),
    }
    println!();
    println!("'pagar' para confirmar, 'cancelar' para volver a la lista.");
}

fn card_form(flow: &PaymentFlow) {
    let card = flow.card();
    println!();
    println!("Pago con tarjeta:");
    println!("  Nombre en la tarjeta: {}", card.holder_name());
    println!("  Número de tarjeta:    {}", card.number());
    println!("  Vencimiento (MM/AA):  {}", card.expiry());
    println!("  CVV:                  {}", card.masked_cvv());
    println!("Completa con: titular <nombre> | numero <dígitos> | vence <MMAA> | cvv <dígitos>");
    println!("Pago seguro con encriptación SSL de 256 bits.");
}

fn bank_form(flow: &PaymentFlow, payment: &PaymentItem) {
    let Some(code) = flow.student_code() else {
        return;
    };
    let details = BankTransferDetails::for_payment(&payment.id, code);
    println!();
    println!("Transferencia bancaria:");
    println!("  {}", details.bank);
    println!("  Cuenta: {}", details.account);
    println!("  CCI: {}", details.cci);
    println!("  Titular: {}", details.holder);
    println!("  Referencia: {}", details.reference);
    println!("Instrucciones:");
    println!("  1. Realiza la transferencia por el monto exacto indicado.");
    println!("  2. Incluye el código de referencia en la descripción del pago.");
    println!(
        "  3. Guarda el comprobante y envíalo a {}.",
        details.treasury_email
    );
}

fn mobile_form() {
    println!();
    println!("Escanea el código QR con tu app de pagos.");
    println!("Una vez realizado el pago, recibirás una confirmación automática.");
}

pub fn confirmation_screen(flow: &PaymentFlow) {
    println!();
    student_header(flow);
    let Some(receipt) = flow.receipt() else {
        return;
    };

    println!();
    println!("¡Pago Exitoso! Tu pago ha sido procesado correctamente.");
    println!("Concepto: {}", receipt.concept.label());
    if let Some(month) = &receipt.month {
        println!("Periodo: {month}");
    }
    println!("Monto: S/ {:.2}", receipt.amount);
    println!("Fecha: {}", format_date(receipt.settled_on));
    println!("Código de operación: {}", receipt.operation_code);
    println!("Estado: Pagado");
    println!();
    println!("Presiona Enter para finalizar.");
}

pub fn alert(message: &str) {
    println!("[!] {message}");
}

/// User-facing alert text for a flow failure.
pub fn alert_text(err: &FlowError) -> String {
    match err {
        FlowError::Code(CodeError::Empty) => "Por favor ingresa un código modular".to_owned(),
        FlowError::Code(_) => "El código modular debe tener entre 1 y 14 dígitos".to_owned(),
        FlowError::Rejected(message) => message.clone(),
        FlowError::Connection(_) => {
            "No se pudo conectar con el servidor. Intenta nuevamente.".to_owned()
        }
        other => other.to_string(),
    }
}
