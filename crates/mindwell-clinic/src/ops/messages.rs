use rusqlite::Connection;
use tracing::info;

use mindwell_core::models::message::{Message, NewMessage};
use mindwell_core::principal::{AccountKind, Capability, Principal};
use mindwell_storage::repo::{health_workers, messages};

use crate::authz::authorize;
use crate::error::ClinicError;
use crate::ops;

/// Messaging is between health workers; admins have no mailbox.
fn mailbox_owner(principal: &Principal) -> Result<i64, ClinicError> {
    authorize(principal, Capability::Messaging)?;
    match principal.account {
        AccountKind::Staff => Ok(principal.user_id),
        AccountKind::Admin => Err(ClinicError::Forbidden(
            "only health workers can use messaging".to_string(),
        )),
    }
}

pub fn send(conn: &Connection, principal: &Principal, new: NewMessage) -> Result<Message, ClinicError> {
    let sender_id = mailbox_owner(principal)?;
    let body = ops::required(&new.message, "message")?;
    if !health_workers::exists(conn, new.receiver_id)? {
        return Err(ClinicError::not_found("receiver not found"));
    }

    let message = messages::insert(conn, sender_id, new.receiver_id, &body)?;
    info!(
        message_id = message.id,
        sender_id,
        receiver_id = message.receiver_id,
        "message sent"
    );
    Ok(message)
}

/// Messages between the caller and `other_id`, oldest first.
pub fn conversation(
    conn: &Connection,
    principal: &Principal,
    other_id: i64,
) -> Result<Vec<Message>, ClinicError> {
    let me = mailbox_owner(principal)?;
    if !health_workers::exists(conn, other_id)? {
        return Err(ClinicError::not_found("health worker not found"));
    }
    Ok(messages::conversation(conn, me, other_id)?)
}

/// Messages received by the caller, newest first.
pub fn inbox(conn: &Connection, principal: &Principal) -> Result<Vec<Message>, ClinicError> {
    let me = mailbox_owner(principal)?;
    Ok(messages::inbox(conn, me)?)
}

/// Only the sender may retract a message.
pub fn delete(conn: &Connection, principal: &Principal, id: i64) -> Result<(), ClinicError> {
    let me = mailbox_owner(principal)?;
    let message = messages::get(conn, id)?.ok_or_else(|| ClinicError::not_found("message not found"))?;
    if message.sender_id != me {
        return Err(ClinicError::Forbidden("only the sender can delete a message".to_string()));
    }
    messages::delete(conn, id)?;
    info!(message_id = id, "message deleted");
    Ok(())
}
