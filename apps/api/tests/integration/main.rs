mod test_auth;
mod test_client;
mod test_postgres;
