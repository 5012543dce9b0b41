//! Metadata wrappers, browse requests and links on a live session.

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Context;
use common::{logged_in, session};
use hallon::{
	Album, AlbumBrowse, Artist, ArtistBrowseType, BrowseEvent, LinkType, Linkable, Observe, Ownership, Playlist, Track,
};

#[test]
fn null_pointers_are_absent() {
	let (session, _controller) = session();
	let api = session.api();
	unsafe {
		assert!(Track::from_raw(api, std::ptr::null_mut(), Ownership::Adopt).is_none());
		assert!(Album::from_raw(api, std::ptr::null_mut(), Ownership::Retain).is_none());
		assert!(Playlist::from_raw(api, std::ptr::null_mut(), Ownership::Borrow).is_none());
	}
}

#[test]
fn equality_is_handle_equality() {
	let (session, controller) = session();
	let raw = controller.track("Same name").build();
	let other = controller.track("Same name").build();
	let api = session.api();

	let a = unsafe { Track::from_raw(api, raw, Ownership::Retain) }.unwrap();
	let b = unsafe { Track::from_raw(api, raw, Ownership::Retain) }.unwrap();
	let c = unsafe { Track::from_raw(api, other, Ownership::Retain) }.unwrap();
	assert_eq!(a, b);
	assert_ne!(a, c);
	assert_eq!(a.name(), c.name());

	let set: HashSet<Track> = [a, b, c].into_iter().collect();
	assert_eq!(set.len(), 2);
}

#[test]
fn album_browse_loads_through_the_session() -> anyhow::Result<()> {
	let (session, controller) = session();
	let artist = controller.artist("Kim").build();
	let album_raw = controller.album("Debut").artist(artist).build();
	controller.track("One").album(album_raw).build();
	controller.track("Two").album(album_raw).build();
	controller.track("Elsewhere").build();

	let album = unsafe { Album::from_raw(session.api(), album_raw, Ownership::Retain) }.context("album handle")?;
	let browse = album.browse(&session)?;
	assert!(!browse.is_loaded());
	assert!(browse.tracks().is_empty());

	let loads = Arc::new(AtomicUsize::new(0));
	{
		let loads = Arc::clone(&loads);
		browse.on(BrowseEvent::Load, move |_| {
			loads.fetch_add(1, Ordering::SeqCst);
			None
		});
	}

	assert!(browse.wait_until_loaded(&session, Duration::from_secs(2))?);
	assert_eq!(loads.load(Ordering::SeqCst), 1);
	assert_eq!(browse.error(), Ok(()));
	let names: Vec<String> = browse.tracks().iter().map(Track::name).collect();
	assert_eq!(names, ["One", "Two"]);
	Ok(())
}

#[test]
fn artist_browse_lists_albums() {
	let (session, controller) = session();
	let artist_raw = controller.artist("Kim").build();
	controller.album("Debut").artist(artist_raw).build();
	controller.album("Sophomore").artist(artist_raw).build();

	let artist = unsafe { Artist::from_raw(session.api(), artist_raw, Ownership::Retain) }.unwrap();
	let browse = artist.browse(&session, ArtistBrowseType::NoTracks).unwrap();
	assert!(browse.wait_until_loaded(&session, Duration::from_secs(2)).unwrap());
	let names: Vec<String> = browse.albums().iter().map(Album::name).collect();
	assert_eq!(names, ["Debut", "Sophomore"]);
}

#[test]
fn browse_stays_pending_until_pumped() {
	let (session, controller) = session();
	let album_raw = controller.album("Lost").build();
	let album = unsafe { Album::from_raw(session.api(), album_raw, Ownership::Retain) }.unwrap();
	let browse = AlbumBrowse::new(&session, &album).unwrap();
	// Nothing pumps the session, so the request stays pending.
	assert!(!browse.is_loaded());
	assert_eq!(controller.pending(), 1);
}

#[test]
fn track_links_round_trip() -> anyhow::Result<()> {
	let (session, controller) = session();
	let uri = "spotify:track:4uLU6hMCjMI75M1A2tKUQC";
	let raw = controller.track("Linked").link(uri).build();
	let track = unsafe { Track::from_raw(session.api(), raw, Ownership::Retain) }.context("track handle")?;

	let link = session.link(uri)?.context("parsed link")?;
	assert_eq!(link.link_type()?, LinkType::Track);
	assert_eq!(link.get::<Track>(), Some(track.clone()));
	assert_eq!(track.to_uri().as_deref(), Some(uri));
	Ok(())
}

#[test]
fn garbage_links_are_absent() {
	let (session, _controller) = session();
	assert!(session.link("not a link").unwrap().is_none());
}

#[test]
fn account_objects_have_links() {
	let (session, _controller) = logged_in("kim");
	let user = session.user().unwrap();
	assert_eq!(user.to_uri().as_deref(), Some("spotify:user:kim"));
	let starred = session.starred_for(&user).unwrap().unwrap();
	let link = starred.to_link().unwrap();
	assert_eq!(link.link_type().unwrap(), LinkType::Playlist);
}

#[test]
fn references_are_balanced() {
	let (session, controller) = logged_in("kim");
	let playlist_raw = controller.playlist("Mix").build();
	let track_raw = controller.track("One").build();
	controller.push_track(playlist_raw, track_raw);

	let playlist = unsafe { Playlist::from_raw(session.api(), playlist_raw, Ownership::Adopt) }.unwrap();
	let tracks = playlist.tracks();
	assert_eq!(controller.refcount(track_raw), 2);
	drop(tracks);
	assert_eq!(controller.refcount(track_raw), 1);
	drop(playlist);
	assert_eq!(controller.refcount(playlist_raw), 0);
}

#[test]
fn browse_wait_wakes_on_a_completion_from_another_thread() -> anyhow::Result<()> {
	let (session, controller) = session();
	controller.hold_browses(true);
	// A zero hint must not turn the wait into a spin.
	controller.set_next_timeout(Duration::ZERO);
	let album_raw = controller.album("Late").build();
	controller.track("Only").album(album_raw).build();

	let album = unsafe { Album::from_raw(session.api(), album_raw, Ownership::Retain) }.context("album handle")?;
	let browse = album.browse(&session)?;
	let before = controller.process_events_count();

	let completer = {
		let controller = controller.clone();
		std::thread::spawn(move || {
			std::thread::sleep(Duration::from_millis(50));
			controller.complete_browses()
		})
	};
	assert!(browse.wait_until_loaded(&session, Duration::from_secs(5))?);
	assert_eq!(completer.join().unwrap(), 1);

	let pumped = controller.process_events_count() - before;
	assert!(pumped <= 4, "pumped {pumped} times while waiting");
	let names: Vec<String> = browse.tracks().iter().map(Track::name).collect();
	assert_eq!(names, ["Only"]);
	Ok(())
}

#[test]
fn held_browse_times_out() -> anyhow::Result<()> {
	let (session, controller) = session();
	controller.hold_browses(true);
	let album_raw = controller.album("Never").build();
	let album = unsafe { Album::from_raw(session.api(), album_raw, Ownership::Retain) }.context("album handle")?;
	let browse = album.browse(&session)?;
	assert!(!browse.wait_until_loaded(&session, Duration::from_millis(100))?);
	assert_eq!(controller.pending(), 1);
	assert_eq!(controller.complete_browses(), 1);
	assert!(browse.is_loaded());
	Ok(())
}
