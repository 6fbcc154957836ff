fn main() {
    psi_booking::start();
}
