// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use generic_array::{ArrayLength, GenericArray};

#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("Write buffer is full")]
	WriteBufferFull,
	#[error("Not enough data in read buffer to deserialize")]
	NotEnoughBytes,
	#[error("length prefix {len} exceeds the allowed maximum {max}")]
	LengthTooLarge { len: u64, max: usize },
	#[error("unsupported encoding version {0}")]
	UnsupportedVersion(u8),
}

/// Represents type that can be serialized to a byte buffer.
pub trait SerializeBytes {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error>;
}

/// Represents type that can be deserialized from a byte buffer.
pub trait DeserializeBytes {
	fn deserialize(read_buf: impl Buf) -> Result<Self, Error>
	where
		Self: Sized;
}

fn assert_enough_space_for(write_buf: &impl BufMut, size: usize) -> Result<(), Error> {
	if write_buf.remaining_mut() < size {
		return Err(Error::WriteBufferFull);
	}
	Ok(())
}

fn assert_enough_data_for(read_buf: &impl Buf, size: usize) -> Result<(), Error> {
	if read_buf.remaining() < size {
		return Err(Error::NotEnoughBytes);
	}
	Ok(())
}

impl SerializeBytes for u8 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		assert_enough_space_for(&write_buf, 1)?;
		write_buf.put_u8(*self);
		Ok(())
	}
}

impl DeserializeBytes for u8 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		assert_enough_data_for(&read_buf, 1)?;
		Ok(read_buf.get_u8())
	}
}

impl SerializeBytes for u64 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		assert_enough_space_for(&write_buf, 8)?;
		write_buf.put_u64_le(*self);
		Ok(())
	}
}

impl DeserializeBytes for u64 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		assert_enough_data_for(&read_buf, 8)?;
		Ok(read_buf.get_u64_le())
	}
}

impl<N: ArrayLength<u8>> SerializeBytes for GenericArray<u8, N> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		assert_enough_space_for(&write_buf, N::USIZE)?;
		write_buf.put_slice(self);
		Ok(())
	}
}

impl<N: ArrayLength<u8>> DeserializeBytes for GenericArray<u8, N> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		assert_enough_data_for(&read_buf, N::USIZE)?;

		let mut ret = Self::default();
		read_buf.copy_to_slice(&mut ret);
		Ok(ret)
	}
}

/// Writes a collection length as a little-endian `u64`.
pub fn serialize_len(len: usize, write_buf: impl BufMut) -> Result<(), Error> {
	(len as u64).serialize(write_buf)
}

/// Reads a little-endian `u64` length prefix and rejects it if it exceeds `max`.
///
/// Callers pass a bound derived from public parameters, so a hostile length prefix is rejected
/// before anything is allocated for it.
pub fn deserialize_len(read_buf: impl Buf, max: usize) -> Result<usize, Error> {
	let len = u64::deserialize(read_buf)?;
	if len > max as u64 {
		return Err(Error::LengthTooLarge { len, max });
	}
	Ok(len as usize)
}

/// Reads `len` raw bytes.
pub fn deserialize_bytes(mut read_buf: impl Buf, len: usize) -> Result<Vec<u8>, Error> {
	assert_enough_data_for(&read_buf, len)?;
	let mut out = vec![0u8; len];
	read_buf.copy_to_slice(&mut out);
	Ok(out)
}
