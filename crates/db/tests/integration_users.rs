//! Integration-Tests fuer UserRepository (In-Memory SQLite)

use kurswerk_core::{RoleId, UserId};
use kurswerk_db::{
    models::{BenutzerSuche, NeuerBenutzer, RolleRecord},
    DbError, RoleRepository, SqliteDb, UserRepository,
};

async fn db() -> SqliteDb {
    let db = SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden");
    for (id, name) in [(1, "Admin"), (2, "Lehrer"), (3, "Student")] {
        db.upsert_role(&RolleRecord { id: RoleId(id), name: name.into() })
            .await
            .unwrap();
    }
    db
}

fn neuer<'a>(username: &'a str, email: &'a str) -> NeuerBenutzer<'a> {
    NeuerBenutzer {
        username,
        email,
        password_hash: "$argon2id$v=19$m=65536,t=3,p=1$c2FsdA$aGFzaA",
    }
}

#[tokio::test]
async fn benutzer_erstellen_und_laden() {
    let db = db().await;

    let user = db
        .create(neuer("alice", "a@x.com"))
        .await
        .expect("Benutzer erstellen fehlgeschlagen");

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");

    let geladen = db
        .get_by(BenutzerSuche::Id(user.id))
        .await
        .expect("get_by fehlgeschlagen")
        .expect("Benutzer sollte gefunden werden");

    assert_eq!(geladen.id, user.id);
    assert_eq!(geladen.username, "alice");
    assert_eq!(geladen.password_hash, user.password_hash);
}

#[tokio::test]
async fn benutzer_nach_name_und_email_laden() {
    let db = db().await;
    db.create(neuer("bob", "b@y.com")).await.unwrap();

    let per_name = db
        .get_by(BenutzerSuche::Username("bob"))
        .await
        .unwrap()
        .expect("Benutzer 'bob' sollte gefunden werden");
    assert_eq!(per_name.username, "bob");

    let per_email = db.get_by(BenutzerSuche::Email("b@y.com")).await.unwrap();
    assert_eq!(per_email.map(|u| u.id), Some(per_name.id));

    let nicht_gefunden = db.get_by(BenutzerSuche::Username("unbekannt")).await.unwrap();
    assert!(nicht_gefunden.is_none());

    let falsche_id = db.get_by(BenutzerSuche::Id(UserId(9999))).await.unwrap();
    assert!(falsche_id.is_none());
}

#[tokio::test]
async fn benutzername_unique() {
    let db = db().await;
    db.create(neuer("charlie", "c1@x.com")).await.unwrap();

    let err = db.create(neuer("charlie", "c2@x.com")).await.unwrap_err();
    assert!(matches!(err, DbError::Eindeutigkeit(_)), "erwartet Eindeutigkeit, war {err:?}");
    assert!(err.ist_eindeutigkeit());
}

#[tokio::test]
async fn email_ist_nicht_eindeutig() {
    let db = db().await;
    db.create(neuer("d1", "gleich@x.com")).await.unwrap();
    db.create(neuer("d2", "gleich@x.com"))
        .await
        .expect("gleiche E-Mail wird nicht erzwungen");
}

#[tokio::test]
async fn rollen_in_reihenfolge_zuweisen() {
    let db = db().await;
    let user = db.create(neuer("erika", "e@x.com")).await.unwrap();

    db.assign_roles(user.id, &[RoleId(3)]).await.unwrap();
    db.assign_roles(user.id, &[RoleId(2), RoleId(1)]).await.unwrap();

    let bmr = db
        .get_with_roles(BenutzerSuche::Username("erika"))
        .await
        .unwrap()
        .unwrap();

    let ids: Vec<RoleId> = bmr.rollen.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RoleId(3), RoleId(2), RoleId(1)]);
    assert_eq!(bmr.primaere_rolle().map(|r| r.name.as_str()), Some("Student"));
}

#[tokio::test]
async fn unbekannte_rolle_zuweisen_schlaegt_fehl() {
    let db = db().await;
    let user = db.create(neuer("frank", "f@x.com")).await.unwrap();

    let ergebnis = db.assign_roles(user.id, &[RoleId(42)]).await;
    assert!(ergebnis.is_err(), "Fremdschluessel muss greifen");

    // Transaktion wurde zurueckgerollt
    let bmr = db.get_with_roles(BenutzerSuche::Id(user.id)).await.unwrap().unwrap();
    assert!(bmr.rollen.is_empty());
}

#[tokio::test]
async fn benutzer_loeschen_entfernt_rollen() {
    let db = db().await;
    let user = db.create(neuer("gina", "g@x.com")).await.unwrap();
    db.assign_roles(user.id, &[RoleId(3)]).await.unwrap();

    assert!(db.delete(user.id).await.unwrap());
    assert!(!db.delete(user.id).await.unwrap());
    assert!(db.get_with_roles(BenutzerSuche::Id(user.id)).await.unwrap().is_none());

    let anzahl: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_roles WHERE user_id = ?")
        .bind(user.id.inner())
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(anzahl, 0);
}
