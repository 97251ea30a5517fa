mod ticket_record;

pub use ticket_record::TicketRecord;
